//! SQLite-backed watch store using sqlx.

use {
    async_trait::async_trait,
    sqlx::{SqlitePool, sqlite::SqlitePoolOptions},
};

use crate::{
    Error, Result,
    store::WatchStore,
    types::{WatchPatch, WatchRecord, WatchRecordCreate},
};

/// Internal row type for sqlx mapping. List columns are JSON-encoded.
#[derive(sqlx::FromRow)]
struct WatchRow {
    id: i64,
    target_id: String,
    relay_to_source: bool,
    forwarded_group_ids: String,
    forwarded_user_ids: String,
    bypassed_user_ids: String,
}

impl TryFrom<WatchRow> for WatchRecord {
    type Error = Error;

    fn try_from(r: WatchRow) -> Result<Self> {
        Ok(Self {
            id: r.id as u64,
            target_id: r.target_id,
            relay_to_source: r.relay_to_source,
            forwarded_group_ids: serde_json::from_str(&r.forwarded_group_ids)?,
            forwarded_user_ids: serde_json::from_str(&r.forwarded_user_ids)?,
            bypassed_user_ids: serde_json::from_str(&r.bypassed_user_ids)?,
        })
    }
}

/// SQLite-backed persistence for watched targets.
pub struct SqliteWatchStore {
    pool: SqlitePool,
}

impl SqliteWatchStore {
    /// Create a store using an existing pool. Call [`SqliteWatchStore::init`]
    /// on the pool first.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a store with its own connection pool and initialize the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::init(&pool).await?;
        Ok(Self { pool })
    }

    /// Initialize the watch table schema.
    ///
    /// AUTOINCREMENT keeps surrogate ids monotonic across deletes.
    pub async fn init(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS watch_targets (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                target_id           TEXT    NOT NULL UNIQUE,
                relay_to_source     INTEGER NOT NULL DEFAULT 0,
                forwarded_group_ids TEXT    NOT NULL DEFAULT '[]',
                forwarded_user_ids  TEXT    NOT NULL DEFAULT '[]',
                bypassed_user_ids   TEXT    NOT NULL DEFAULT '[]'
            )"#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.kind() == sqlx::error::ErrorKind::UniqueViolation)
}

#[async_trait]
impl WatchStore for SqliteWatchStore {
    async fn create(&self, create: WatchRecordCreate) -> Result<WatchRecord> {
        let result = sqlx::query(
            r#"INSERT INTO watch_targets
                 (target_id, relay_to_source, forwarded_group_ids, forwarded_user_ids, bypassed_user_ids)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&create.target_id)
        .bind(create.relay_to_source)
        .bind(serde_json::to_string(&create.forwarded_group_ids)?)
        .bind(serde_json::to_string(&create.forwarded_user_ids)?)
        .bind(serde_json::to_string(&create.bypassed_user_ids)?)
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(e) if is_unique_violation(&e) => {
                return Err(Error::duplicate_target(create.target_id));
            },
            Err(e) => return Err(e.into()),
        };

        Ok(create.into_record(result.last_insert_rowid() as u64))
    }

    async fn get(&self, target_id: &str) -> Result<Option<WatchRecord>> {
        let row = sqlx::query_as::<_, WatchRow>("SELECT * FROM watch_targets WHERE target_id = ?")
            .bind(target_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self) -> Result<Vec<WatchRecord>> {
        let rows = sqlx::query_as::<_, WatchRow>("SELECT * FROM watch_targets ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update(&self, target_id: &str, patch: &WatchPatch) -> Result<()> {
        // Records are read and rewritten as a whole; no per-field locking.
        let mut record = self
            .get(target_id)
            .await?
            .ok_or_else(|| Error::target_not_found(target_id))?;
        record.apply(patch);

        sqlx::query(
            r#"UPDATE watch_targets
               SET relay_to_source = ?,
                   forwarded_group_ids = ?,
                   forwarded_user_ids = ?,
                   bypassed_user_ids = ?
               WHERE target_id = ?"#,
        )
        .bind(record.relay_to_source)
        .bind(serde_json::to_string(&record.forwarded_group_ids)?)
        .bind(serde_json::to_string(&record.forwarded_user_ids)?)
        .bind(serde_json::to_string(&record.bypassed_user_ids)?)
        .bind(target_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, target_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM watch_targets WHERE target_id = ?")
            .bind(target_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
