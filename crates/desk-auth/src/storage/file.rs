use std::fs;
use std::path::PathBuf;

use super::{TokenStorage, write_private};
use crate::error::AuthError;
use crate::tokens::TokenSet;

/// Tokens as JSON in a private file (`~/.casedesk/credentials` by default).
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Result<Option<TokenSet>, AuthError> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content).map(Some).map_err(|e| {
            AuthError::TokenStoreError(format!("parse {}: {e}", self.path.display()))
        })
    }

    fn store(&self, tokens: &TokenSet) -> Result<(), AuthError> {
        let json = serde_json::to_string(tokens)
            .map_err(|e| AuthError::TokenStoreError(format!("serialize tokens: {e}")))?;
        write_private(&self.path, &json)
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::TokenStoreError(format!(
                    "failed to delete {}: {e}",
                    self.path.display()
                ))
            })?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file ({})", self.path.display())
    }
}
