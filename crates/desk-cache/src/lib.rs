//! # desk-cache
//!
//! Query cache for API reads.
//!
//! Values are stored type-erased in a `moka` future cache keyed by
//! [`QueryKey`]. Concurrent fetches of the same key share one request, failed
//! fetches are never cached, and writes invalidate by scope (optionally
//! narrowed to one case).

mod error;
mod key;

pub use error::QueryError;
pub use key::QueryKey;

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

type Erased = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
pub struct QueryCache {
    inner: Cache<QueryKey, Erased>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(1000, Duration::from_secs(30))
    }
}

impl QueryCache {
    #[must_use]
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .support_invalidation_closures()
                .build(),
        }
    }

    /// Return the cached value for `key`, or run `fetch` to produce it.
    ///
    /// Callers racing on the same key wait for the first caller's fetch and
    /// receive its result. Errors are handed to every waiter and not stored.
    ///
    /// # Errors
    ///
    /// [`QueryError::Fetch`] wraps the error returned by `fetch`.
    pub async fn fetch<T, E, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<Arc<T>, QueryError<E>>
    where
        T: Send + Sync + 'static,
        E: std::error::Error + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        debug_assert!(key.holds::<T>(), "query key built for another type");
        let scope = key.scope().to_string();
        let erased = self
            .inner
            .try_get_with(key, async move { fetch().await.map(|v| Arc::new(v) as Erased) })
            .await
            .map_err(QueryError::Fetch)?;
        erased
            .downcast::<T>()
            .map_err(|_| QueryError::TypeMismatch { scope })
    }

    /// Cached value for `key` without fetching.
    pub async fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        self.inner.get(key).await?.downcast::<T>().ok()
    }

    /// Drop every entry in `scope`, or only those for `case_code` when given.
    pub fn invalidate(&self, scope: &str, case_code: Option<&str>) {
        let scope = scope.to_string();
        let case_code = case_code.map(str::to_string);
        tracing::debug!(%scope, case = ?case_code, "invalidating queries");
        let result = self.inner.invalidate_entries_if(move |key, _| {
            key.scope() == scope
                && case_code
                    .as_deref()
                    .is_none_or(|code| key.case_code() == Some(code))
        });
        if let Err(error) = result {
            tracing::warn!(%error, "scoped invalidation unavailable; clearing cache");
            self.inner.invalidate_all();
        }
    }

    /// Drop every entry that belongs to `case_code`, across all scopes.
    pub fn invalidate_case(&self, case_code: &str) {
        let case_code = case_code.to_string();
        let result = self
            .inner
            .invalidate_entries_if(move |key, _| key.case_code() == Some(case_code.as_str()));
        if let Err(error) = result {
            tracing::warn!(%error, "scoped invalidation unavailable; clearing cache");
            self.inner.invalidate_all();
        }
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate entry count. Pending maintenance may lag behind.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
