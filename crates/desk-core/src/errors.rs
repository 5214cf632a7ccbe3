//! Cross-cutting error types for casedesk.
//!
//! Transport and API failures live in `desk-client` (`ApiError`); this enum
//! covers what can go wrong before a request is ever built.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed local validation (page numbers, sort specs, statuses).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An action is not allowed in the record's current state.
    #[error("{entity} {id}: {reason}")]
    NotAllowed {
        entity: String,
        id: String,
        reason: String,
    },
}
