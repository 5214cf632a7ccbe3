use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: run `desk auth login`")]
    NotAuthenticated,

    #[error("token expired: run `desk auth login` to refresh")]
    TokenExpired,

    #[error("auth is not configured: {0}")]
    NotConfigured(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("browser login failed: {0}")]
    BrowserFlowFailed(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("identity provider rejected the request ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("identity provider unreachable: {0}")]
    Http(#[from] reqwest::Error),
}
