//! Persistence trait for the watch registry.

use async_trait::async_trait;

use crate::{
    Result,
    types::{WatchPatch, WatchRecord, WatchRecordCreate},
};

/// Persistence backend for watched targets.
///
/// Implementations serialize per call; the callers never issue concurrent
/// writes against the same logical record within one handler invocation.
#[async_trait]
pub trait WatchStore: Send + Sync {
    /// Insert a new record and assign its surrogate id.
    ///
    /// Errors with [`crate::Error::DuplicateTarget`] when a record for the
    /// same `target_id` already exists.
    async fn create(&self, create: WatchRecordCreate) -> Result<WatchRecord>;

    /// Fetch the record for a target, if any.
    async fn get(&self, target_id: &str) -> Result<Option<WatchRecord>>;

    /// All records in creation (id) order.
    async fn list(&self) -> Result<Vec<WatchRecord>>;

    /// Apply a partial update to an existing record.
    ///
    /// Errors with [`crate::Error::TargetNotFound`] when absent.
    async fn update(&self, target_id: &str, patch: &WatchPatch) -> Result<()>;

    /// Remove the record for a target. Deleting an absent target is Ok —
    /// the command surface relies on the delete call being a no-op after a
    /// not-found report.
    async fn delete(&self, target_id: &str) -> Result<()>;
}
