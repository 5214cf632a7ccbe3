use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CaseStatus;

/// A case, identified by its human-assigned code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub case_name: String,
    pub doctor_first_name: Option<String>,
    pub doctor_last_name: Option<String>,
    pub patient_first_name: String,
    pub patient_last_name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub is_locked: bool,
    #[serde(default)]
    pub locked_by: Option<String>,
    #[serde(default)]
    pub locked_at: Option<DateTime<Utc>>,
    /// Raw workflow status. Use [`Case::workflow_status`] to interpret it.
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    #[must_use]
    pub fn workflow_status(&self) -> CaseStatus {
        CaseStatus::classify(self.status.as_deref())
    }

    /// `"First Last"` with missing parts left blank, trimmed.
    #[must_use]
    pub fn doctor_name(&self) -> String {
        join_name(
            self.doctor_first_name.as_deref(),
            self.doctor_last_name.as_deref(),
        )
    }

    #[must_use]
    pub fn patient_name(&self) -> String {
        join_name(
            Some(&self.patient_first_name),
            Some(&self.patient_last_name),
        )
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default())
        .trim()
        .to_string()
}

/// Lock state as reported by `GET /cases/{code}/lock`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseLockState {
    pub is_locked: bool,
    /// Whether the current caller may release the lock.
    pub can_be_unlocked: bool,
    pub case_code: String,
}
