use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One audit record in a case's history. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub uid: String,
    pub created_at: DateTime<Utc>,
    pub actor_uid: String,
    pub actor_full_name: String,
    pub event_type: String,
    pub action_description: String,
}
