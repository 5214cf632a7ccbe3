//! # desk-auth
//!
//! Authentication for the casedesk CLI against a hosted OAuth2 identity provider.
//!
//! Provides browser login (authorization code + PKCE over `tiny_http` + `open`),
//! pluggable token storage (OS keychain, private file, Netscape cookie jar),
//! and opportunistic refresh before requests go out.

pub mod browser_flow;
pub mod error;
pub mod provider;
pub mod refresh;
pub mod storage;
pub mod tokens;

pub use error::AuthError;
pub use provider::IdentityProvider;
pub use refresh::TokenManager;
pub use storage::TokenStorage;
pub use tokens::TokenSet;

/// Supplies the bearer token for outgoing API requests.
///
/// `Ok(None)` means the request goes out unauthenticated.
#[async_trait::async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`AuthError`] if a token exists but cannot be made usable.
    async fn access_token(&self) -> Result<Option<String>, AuthError>;
}

/// A fixed token (or none), for tests and scripted use.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

#[async_trait::async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.0.clone())
    }
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the stored session cannot be removed.
pub fn logout(storage: &dyn TokenStorage) -> Result<(), AuthError> {
    storage.clear()
}
