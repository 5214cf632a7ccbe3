use std::sync::Mutex;

use super::TokenStorage;
use crate::error::AuthError;
use crate::tokens::TokenSet;

/// Process-local storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tokens: Mutex<Option<TokenSet>>,
}

impl MemoryStorage {
    #[must_use]
    pub const fn new(tokens: Option<TokenSet>) -> Self {
        Self {
            tokens: Mutex::new(tokens),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<TokenSet>>, AuthError> {
        self.tokens
            .lock()
            .map_err(|_| AuthError::TokenStoreError("memory token store poisoned".into()))
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<TokenSet>, AuthError> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, tokens: &TokenSet) -> Result<(), AuthError> {
        *self.slot()? = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.slot()? = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
