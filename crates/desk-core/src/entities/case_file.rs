use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CaseFileStatus;

/// A file attached to a case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    pub uid: String,
    /// Object key / path within the case.
    pub key: String,
    pub status: CaseFileStatus,
    pub case_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CaseFile {
    /// Local file name for a download: last path segment of the key, or the
    /// uid when the key has none.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.key
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(self.uid.as_str())
    }
}

/// Time-limited download target for a stored file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileDownloadUrl {
    pub uid: String,
    pub file_path: String,
    pub url: String,
    /// Seconds until `url` stops working.
    pub expires_in: u64,
}

/// Time-limited upload target issued for one requested file path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUpload {
    pub uid: String,
    pub file_path: String,
    pub url: String,
    pub expires_in: u64,
}
