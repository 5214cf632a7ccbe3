//! Errors raised while loading or checking casedesk settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings source could not be parsed, or a value has the wrong type.
    #[error("failed to load casedesk settings: {0}")]
    Load(#[from] figment::Error),

    /// A required setting is empty.
    #[error("{key} is not set (set {env} or add it to .casedesk/config.toml)")]
    Missing { key: &'static str, env: &'static str },

    #[error("{key} = '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}
