use std::path::PathBuf;

use super::{FileStorage, TOKEN_ENV_VAR, TokenStorage};
use crate::error::AuthError;
use crate::tokens::TokenSet;

const DEFAULT_KEYRING_SERVICE: &str = "casedesk-cli";
const KEYRING_USER: &str = "session";

/// Returns the keyring service name.
///
/// Defaults to `"casedesk-cli"`. Override via `DESK_KEYRING_SERVICE` so tests
/// never touch real credentials.
fn keyring_service() -> String {
    std::env::var("DESK_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// OS keychain storage with an env-var and file fallback.
///
/// Load priority: keyring → `DESK_AUTH__TOKEN` → credentials file.
#[derive(Debug, Clone)]
pub struct KeyringStorage {
    fallback: FileStorage,
}

impl KeyringStorage {
    #[must_use]
    pub const fn new(fallback_path: PathBuf) -> Self {
        Self {
            fallback: FileStorage::new(fallback_path),
        }
    }

    fn entry() -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(&keyring_service(), KEYRING_USER)
    }

    fn load_keyring() -> Option<TokenSet> {
        let secret = Self::entry().ok()?.get_password().ok()?;
        if secret.is_empty() {
            return None;
        }
        match serde_json::from_str(&secret) {
            Ok(tokens) => Some(tokens),
            Err(error) => {
                tracing::warn!(%error, "ignoring unreadable keyring entry");
                None
            }
        }
    }

    /// Which tier currently holds a session, for `desk auth status`.
    #[must_use]
    pub fn detect_source(&self) -> Option<&'static str> {
        if Self::load_keyring().is_some() {
            return Some("keyring");
        }
        if std::env::var(TOKEN_ENV_VAR).is_ok_and(|t| !t.is_empty()) {
            return Some("env");
        }
        if self.fallback.load().ok().flatten().is_some() {
            return Some("file");
        }
        None
    }
}

impl TokenStorage for KeyringStorage {
    fn load(&self) -> Result<Option<TokenSet>, AuthError> {
        if let Some(tokens) = Self::load_keyring() {
            return Ok(Some(tokens));
        }

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
            && !token.is_empty()
        {
            return Ok(Some(TokenSet::from_access_token(token)));
        }

        self.fallback.load()
    }

    fn store(&self, tokens: &TokenSet) -> Result<(), AuthError> {
        let json = serde_json::to_string(tokens)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize tokens: {e}")))?;
        match Self::entry() {
            Ok(entry) => match entry.set_password(&json) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.fallback.store(tokens)
                }
            },
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; falling back to file");
                self.fallback.store(tokens)
            }
        }
    }

    fn clear(&self) -> Result<(), AuthError> {
        if let Ok(entry) = Self::entry()
            && let Err(error) = entry.delete_credential()
            && !matches!(error, keyring::Error::NoEntry)
        {
            tracing::debug!(%error, "keyring delete failed");
        }
        self.fallback.clear()
    }

    fn describe(&self) -> String {
        self.detect_source().map_or_else(
            || "keyring (empty)".to_string(),
            |source| format!("keyring ({source})"),
        )
    }
}
