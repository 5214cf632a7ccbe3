use tokio::sync::Mutex;

use crate::AccessTokenSource;
use crate::error::AuthError;
use crate::provider::IdentityProvider;
use crate::storage::TokenStorage;
use crate::tokens::TokenSet;

/// Refresh when the access token expires within this many seconds.
pub const EXPIRY_BUFFER_SECS: i64 = 60;

/// Hands out access tokens, refreshing them through the identity provider
/// when they are missing or about to expire.
///
/// Concurrent callers share one refresh: the lock is held across
/// load → refresh → store, and waiters re-read storage afterwards.
pub struct TokenManager {
    storage: Box<dyn TokenStorage>,
    provider: Option<IdentityProvider>,
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    #[must_use]
    pub fn new(storage: Box<dyn TokenStorage>, provider: Option<IdentityProvider>) -> Self {
        Self {
            storage,
            provider,
            refresh_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn storage(&self) -> &dyn TokenStorage {
        self.storage.as_ref()
    }

    /// Current tokens, refreshed first if needed. `Ok(None)` when signed out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExpired`] when the access token has expired and
    /// cannot be refreshed, or the provider/storage error from a failed refresh.
    pub async fn current(&self) -> Result<Option<TokenSet>, AuthError> {
        let _guard = self.refresh_lock.lock().await;

        let Some(tokens) = self.storage.load()? else {
            return Ok(None);
        };
        if !tokens.needs_refresh(EXPIRY_BUFFER_SECS) {
            return Ok(Some(tokens));
        }

        if let (Some(refresh_token), Some(provider)) = (tokens.refresh_token.clone(), &self.provider)
        {
            tracing::debug!("access token missing or near expiry; refreshing");
            let refreshed: TokenSet = provider.refresh(&refresh_token).await?.into();
            let merged = tokens.merge(refreshed);
            self.storage.store(&merged)?;
            return Ok(Some(merged));
        }

        if tokens.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        tracing::debug!("access token cannot be refreshed; using it as-is");
        Ok(Some(tokens))
    }

    /// Force a refresh regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no session is stored,
    /// [`AuthError::NotConfigured`] without a provider or refresh token, or the
    /// provider/storage error.
    pub async fn force_refresh(&self) -> Result<TokenSet, AuthError> {
        let _guard = self.refresh_lock.lock().await;

        let tokens = self.storage.load()?.ok_or(AuthError::NotAuthenticated)?;
        let provider = self.provider.as_ref().ok_or_else(|| {
            AuthError::NotConfigured("auth.domain and auth.client_id are required to refresh".into())
        })?;
        let refresh_token = tokens.refresh_token.clone().ok_or_else(|| {
            AuthError::NotConfigured("no refresh token stored for this session".into())
        })?;

        let refreshed: TokenSet = provider.refresh(&refresh_token).await?.into();
        let merged = tokens.merge(refreshed);
        self.storage.store(&merged)?;
        Ok(merged)
    }
}

#[async_trait::async_trait]
impl AccessTokenSource for TokenManager {
    async fn access_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.current().await?.map(|t| t.access_token))
    }
}
