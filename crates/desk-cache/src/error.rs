use std::sync::Arc;

use thiserror::Error;

/// Failure of a cached read.
///
/// The fetch error is shared between every caller that waited on the same
/// query, hence the `Arc`.
#[derive(Debug, Error)]
pub enum QueryError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error(transparent)]
    Fetch(Arc<E>),

    #[error("cached value for '{scope}' has an unexpected type")]
    TypeMismatch { scope: String },
}
