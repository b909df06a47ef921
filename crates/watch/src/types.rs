//! Record types for watched targets.

use serde::{Deserialize, Serialize};

/// A watched target and its forwarding rules.
///
/// `target_id` is a group or user ID and is unique across records. The
/// surrogate `id` is assigned by the store on creation, monotonically, and
/// is never reused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchRecord {
    pub id: u64,
    pub target_id: String,
    /// Echo the deleted content back into the location it was deleted from.
    #[serde(default)]
    pub relay_to_source: bool,
    /// Extra groups that receive a copy of the recall notification.
    #[serde(default)]
    pub forwarded_group_ids: Vec<String>,
    /// Extra users that receive a copy as a direct message.
    #[serde(default)]
    pub forwarded_user_ids: Vec<String>,
    /// Authors whose deletions are ignored for this target.
    #[serde(default)]
    pub bypassed_user_ids: Vec<String>,
}

impl WatchRecord {
    /// Exact string match against the deleting author's ID.
    #[must_use]
    pub fn is_bypassed(&self, user_id: &str) -> bool {
        self.bypassed_user_ids.iter().any(|id| id == user_id)
    }

    /// Overwrite only the fields the patch supplies.
    pub fn apply(&mut self, patch: &WatchPatch) {
        if let Some(relay) = patch.relay_to_source {
            self.relay_to_source = relay;
        }
        if let Some(ids) = &patch.forwarded_group_ids {
            self.forwarded_group_ids = ids.clone();
        }
        if let Some(ids) = &patch.forwarded_user_ids {
            self.forwarded_user_ids = ids.clone();
        }
        if let Some(ids) = &patch.bypassed_user_ids {
            self.bypassed_user_ids = ids.clone();
        }
    }
}

/// Input for creating a new record. The store assigns the `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchRecordCreate {
    pub target_id: String,
    #[serde(default)]
    pub relay_to_source: bool,
    #[serde(default)]
    pub forwarded_group_ids: Vec<String>,
    #[serde(default)]
    pub forwarded_user_ids: Vec<String>,
    #[serde(default)]
    pub bypassed_user_ids: Vec<String>,
}

impl WatchRecordCreate {
    #[must_use]
    pub fn into_record(self, id: u64) -> WatchRecord {
        WatchRecord {
            id,
            target_id: self.target_id,
            relay_to_source: self.relay_to_source,
            forwarded_group_ids: self.forwarded_group_ids,
            forwarded_user_ids: self.forwarded_user_ids,
            bypassed_user_ids: self.bypassed_user_ids,
        }
    }
}

/// Patch for updating an existing record. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay_to_source: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_group_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_user_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypassed_user_ids: Option<Vec<String>>,
}
