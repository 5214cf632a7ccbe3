use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A comment on a case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub uid: String,
    pub created_at: DateTime<Utc>,
    pub created_by_uid: String,
    pub created_by_name: String,
    pub content: String,
}

/// Body of `POST /cases/{code}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
}
