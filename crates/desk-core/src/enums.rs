//! Status enums for cases, case files and invitations.
//!
//! File and invitation statuses use `SCREAMING_SNAKE_CASE` on the wire and fall
//! back to `Unknown` for values this build does not recognise. Case status is
//! free-form on the wire; [`CaseStatus::classify`] is the one place that decides
//! what a raw value means.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value of an approved case.
pub const STATUS_APPROVED: &str = "APPROVED";
/// Wire value of a rejected case.
pub const STATUS_REJECTED: &str = "REJECTED";

// ---------------------------------------------------------------------------
// CaseStatus
// ---------------------------------------------------------------------------

/// Workflow status of a case.
///
/// ```text
/// open → approved   (terminal)
///      → rejected   (terminal)
/// any  → custom     (free-form string set by an operator)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    Open,
    Approved,
    Rejected,
    Custom(String),
}

/// Display tone for a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
    Default,
}

impl CaseStatus {
    /// Classify a raw status as returned by the API.
    ///
    /// Absent and empty values are open. Only exact matches of the two known
    /// constants are terminal; everything else is kept verbatim as `Custom`.
    #[must_use]
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Open,
            Some(STATUS_APPROVED) => Self::Approved,
            Some(STATUS_REJECTED) => Self::Rejected,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// The value sent to `PUT /cases/{code}/status`, if any.
    #[must_use]
    pub fn as_wire(&self) -> Option<&str> {
        match self {
            Self::Open => None,
            Self::Approved => Some(STATUS_APPROVED),
            Self::Rejected => Some(STATUS_REJECTED),
            Self::Custom(value) => Some(value),
        }
    }

    /// Approved and rejected are final. Custom statuses are not.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    #[must_use]
    pub const fn can_approve(&self) -> bool {
        !self.is_final()
    }

    #[must_use]
    pub const fn can_reject(&self) -> bool {
        !self.is_final()
    }

    /// Human label: `-` for open, title case for the known constants,
    /// custom values unchanged.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Open => "-",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Custom(value) => value,
        }
    }

    #[must_use]
    pub const fn tone(&self) -> StatusTone {
        match self {
            Self::Approved => StatusTone::Success,
            Self::Rejected => StatusTone::Error,
            Self::Open | Self::Custom(_) => StatusTone::Default,
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CaseFileStatus
// ---------------------------------------------------------------------------

/// Upload state of a file attached to a case.
///
/// ```text
/// pending → uploaded
///         → reupload → uploaded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseFileStatus {
    Pending,
    Uploaded,
    Reupload,
    #[serde(other)]
    Unknown,
}

impl CaseFileStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Uploaded => "UPLOADED",
            Self::Reupload => "REUPLOAD",
            Self::Unknown => "UNKNOWN",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Uploaded => "Uploaded",
            Self::Reupload => "Reupload",
            Self::Unknown => "Unknown",
        }
    }

    /// Pending files have no object behind them yet.
    #[must_use]
    pub const fn is_downloadable(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for CaseFileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// InvitationStatus
// ---------------------------------------------------------------------------

/// Lifecycle of an invitation.
///
/// ```text
/// pending → accepted
///         → expired
///         → cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl InvitationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Expired => "EXPIRED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Only pending invitations can still be accepted.
    #[must_use]
    pub const fn is_acceptable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, CaseStatus::Open)]
    #[case(Some(""), CaseStatus::Open)]
    #[case(Some("APPROVED"), CaseStatus::Approved)]
    #[case(Some("REJECTED"), CaseStatus::Rejected)]
    #[case(Some("approved"), CaseStatus::Custom("approved".into()))]
    #[case(Some("On hold"), CaseStatus::Custom("On hold".into()))]
    fn classify_raw_status(#[case] raw: Option<&str>, #[case] expected: CaseStatus) {
        assert_eq!(CaseStatus::classify(raw), expected);
    }

    #[rstest]
    #[case(None, true, true)]
    #[case(Some("APPROVED"), false, false)]
    #[case(Some("REJECTED"), false, false)]
    #[case(Some("On hold"), true, true)]
    fn approve_and_reject_follow_terminal_constants(
        #[case] raw: Option<&str>,
        #[case] approve: bool,
        #[case] reject: bool,
    ) {
        let status = CaseStatus::classify(raw);
        assert_eq!(status.can_approve(), approve);
        assert_eq!(status.can_reject(), reject);
    }

    #[test]
    fn labels_and_tones() {
        assert_eq!(CaseStatus::Open.label(), "-");
        assert_eq!(CaseStatus::Approved.label(), "Approved");
        assert_eq!(CaseStatus::Rejected.tone(), StatusTone::Error);
        let custom = CaseStatus::Custom("Needs scan".into());
        assert_eq!(custom.label(), "Needs scan");
        assert_eq!(custom.tone(), StatusTone::Default);
        assert_eq!(custom.as_wire(), Some("Needs scan"));
        assert_eq!(CaseStatus::Open.as_wire(), None);
    }

    #[test]
    fn unknown_file_status_deserializes() {
        let status: CaseFileStatus = serde_json::from_str("\"QUARANTINED\"").unwrap();
        assert_eq!(status, CaseFileStatus::Unknown);
        assert_eq!(status.label(), "Unknown");
    }

    #[test]
    fn pending_files_are_not_downloadable() {
        assert!(!CaseFileStatus::Pending.is_downloadable());
        assert!(CaseFileStatus::Uploaded.is_downloadable());
        assert!(CaseFileStatus::Reupload.is_downloadable());
    }

    #[test]
    fn invitation_status_wire_names() {
        let status: InvitationStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, InvitationStatus::Cancelled);
        assert_eq!(
            serde_json::to_string(&InvitationStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert!(InvitationStatus::Pending.is_acceptable());
        assert!(!InvitationStatus::Expired.is_acceptable());
    }
}
