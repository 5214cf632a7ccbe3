use std::sync::Arc;

use desk_auth::AuthError;
use desk_cache::QueryError;
use desk_config::ConfigError;
use desk_core::errors::CoreError;
use thiserror::Error;

/// Every failure a client call can produce.
///
/// `Display` is the single descriptive string shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("{message} ({})", phrase(.status))]
    Api { status: u16, message: String },

    /// No response: connect failure, timeout, or an unreadable body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] CoreError),

    /// A storage PUT answered with a non-success status.
    #[error("Failed to upload {path}: {status} {reason}")]
    Upload {
        path: String,
        status: u16,
        reason: String,
    },

    #[error("File not found for path: {0}")]
    UnknownUploadPath(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// An error shared by several callers of one cached query.
    #[error(transparent)]
    Shared(Arc<ApiError>),

    #[error("query cache error: {0}")]
    Cache(String),
}

impl From<QueryError<Self>> for ApiError {
    fn from(err: QueryError<Self>) -> Self {
        match err {
            QueryError::Fetch(shared) => Self::Shared(shared),
            QueryError::TypeMismatch { .. } => Self::Cache(err.to_string()),
        }
    }
}

impl ApiError {
    /// HTTP status, if the failure came from an API response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Upload { status, .. } => Some(*status),
            Self::Shared(inner) => inner.status(),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn phrase(status: &u16) -> String {
    describe_status(*status)
}

/// Status phrase used in error messages.
#[must_use]
pub fn describe_status(status: u16) -> String {
    match status {
        400 => "Bad Request".into(),
        401 => "Unauthorized".into(),
        403 => "Forbidden".into(),
        404 => "Not Found".into(),
        500 => "Server Error".into(),
        502 => "Bad Gateway".into(),
        503 => "Service Unavailable".into(),
        other => format!("Error {other}"),
    }
}
