//! In-memory store for tests and hosts without persistence.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    Error, Result,
    store::WatchStore,
    types::{WatchPatch, WatchRecord, WatchRecordCreate},
};

struct State {
    next_id: u64,
    records: Vec<WatchRecord>,
}

/// In-memory store backed by a `Vec`. Ids are monotonic and never reused,
/// matching the SQLite store's AUTOINCREMENT behavior.
pub struct InMemoryWatchStore {
    state: Mutex<State>,
}

impl InMemoryWatchStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                records: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryWatchStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WatchStore for InMemoryWatchStore {
    async fn create(&self, create: WatchRecordCreate) -> Result<WatchRecord> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.records.iter().any(|r| r.target_id == create.target_id) {
            return Err(Error::duplicate_target(create.target_id));
        }
        let id = state.next_id;
        state.next_id += 1;
        let record = create.into_record(id);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, target_id: &str) -> Result<Option<WatchRecord>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state
            .records
            .iter()
            .find(|r| r.target_id == target_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<WatchRecord>> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state.records.clone())
    }

    async fn update(&self, target_id: &str, patch: &WatchPatch) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match state.records.iter_mut().find(|r| r.target_id == target_id) {
            Some(record) => {
                record.apply(patch);
                Ok(())
            },
            None => Err(Error::target_not_found(target_id)),
        }
    }

    async fn delete(&self, target_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.records.retain(|r| r.target_id != target_id);
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn make_create(target_id: &str) -> WatchRecordCreate {
        WatchRecordCreate {
            target_id: target_id.into(),
            ..WatchRecordCreate::default()
        }
    }

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let store = InMemoryWatchStore::new();
        let record = store.create(make_create("100")).await.unwrap();
        assert_eq!(record.id, 1);

        let got = store.get("100").await.unwrap().unwrap();
        assert_eq!(got, record);
    }

    #[tokio::test]
    async fn test_create_duplicate_rejected() {
        let store = InMemoryWatchStore::new();
        store.create(make_create("100")).await.unwrap();
        let err = store.create(make_create("100")).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateTarget { .. }));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_monotonic_never_reused() {
        let store = InMemoryWatchStore::new();
        store.create(make_create("1")).await.unwrap();
        let second = store.create(make_create("2")).await.unwrap();
        assert_eq!(second.id, 2);

        store.delete("2").await.unwrap();
        let third = store.create(make_create("3")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let store = InMemoryWatchStore::new();
        for id in ["300", "100", "200"] {
            store.create(make_create(id)).await.unwrap();
        }
        let targets: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.target_id)
            .collect();
        assert_eq!(targets, ["300", "100", "200"]);
    }

    #[tokio::test]
    async fn test_update_partial() {
        let store = InMemoryWatchStore::new();
        store
            .create(WatchRecordCreate {
                target_id: "100".into(),
                relay_to_source: true,
                forwarded_group_ids: vec!["234567".into()],
                ..WatchRecordCreate::default()
            })
            .await
            .unwrap();

        store
            .update("100", &WatchPatch {
                bypassed_user_ids: Some(vec!["456789".into()]),
                ..WatchPatch::default()
            })
            .await
            .unwrap();

        let got = store.get("100").await.unwrap().unwrap();
        assert_eq!(got.bypassed_user_ids, vec!["456789".to_string()]);
        assert!(got.relay_to_source);
        assert_eq!(got.forwarded_group_ids, vec!["234567".to_string()]);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let store = InMemoryWatchStore::new();
        let err = store
            .update("nope", &WatchPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TargetNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_idempotent() {
        let store = InMemoryWatchStore::new();
        store.create(make_create("100")).await.unwrap();
        store.delete("100").await.unwrap();
        assert!(store.get("100").await.unwrap().is_none());
        // Deleting again is a no-op, not an error.
        store.delete("100").await.unwrap();
    }
}
