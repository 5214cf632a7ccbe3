//! Token storage adapters.
//!
//! Every adapter implements [`TokenStorage`]; the CLI picks one at startup
//! with [`from_config`] based on `auth.storage`.

mod cookie;
mod file;
mod keyring;
mod memory;

pub use cookie::CookieJarStorage;
pub use file::FileStorage;
pub use keyring::KeyringStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use desk_config::{AuthConfig, TokenStorageKind};

use crate::error::AuthError;
use crate::tokens::TokenSet;

/// Environment variable holding an access token for headless use.
pub const TOKEN_ENV_VAR: &str = "DESK_AUTH__TOKEN";

/// Persistent home for a [`TokenSet`].
pub trait TokenStorage: Send + Sync {
    /// Load stored tokens. `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if stored data exists but cannot be read.
    fn load(&self) -> Result<Option<TokenSet>, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the tokens cannot be persisted.
    fn store(&self, tokens: &TokenSet) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if stored tokens cannot be removed.
    fn clear(&self) -> Result<(), AuthError>;

    /// Short name of the backing store, for status display.
    fn describe(&self) -> String;
}

/// Build the storage adapter selected by configuration.
///
/// # Errors
///
/// Returns `AuthError::NotConfigured` when the cookie adapter is selected
/// without a cookie domain or client ID, and `AuthError::TokenStoreError`
/// when no home directory is available for default paths.
pub fn from_config(config: &AuthConfig) -> Result<Box<dyn TokenStorage>, AuthError> {
    match config.storage {
        TokenStorageKind::Keyring => Ok(Box::new(KeyringStorage::new(default_credentials_path()?))),
        TokenStorageKind::File => Ok(Box::new(FileStorage::new(default_credentials_path()?))),
        TokenStorageKind::Cookie => {
            if !config.cookie.is_configured() || config.client_id.is_empty() {
                return Err(AuthError::NotConfigured(
                    "cookie storage needs auth.client_id and auth.cookie.domain".into(),
                ));
            }
            let path = match &config.cookie.jar_path {
                Some(path) => path.clone(),
                None => default_dir()?.join("cookies.txt"),
            };
            Ok(Box::new(CookieJarStorage::new(
                path,
                &config.cookie.domain,
                &config.client_id,
                config.cookie.secure,
            )))
        }
    }
}

fn default_dir() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".casedesk"))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found, cannot store credentials".into())
        })
}

fn default_credentials_path() -> Result<PathBuf, AuthError> {
    default_dir().map(|dir| dir.join("credentials"))
}

/// Write `contents` to `path`, creating a 0700 parent and a 0600 file on unix.
pub(crate) fn write_private(path: &std::path::Path, contents: &str) -> Result<(), AuthError> {
    use std::fs;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, contents)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}
