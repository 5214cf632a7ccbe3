//! REST API endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("casedesk/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the API, without the `/v1` prefix (e.g. `https://api.example.com`).
    #[serde(default)]
    pub base_url: String,

    /// Ceiling for a whole request/response exchange.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Base URL with any trailing slash removed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `base_url` is empty and
    /// [`ConfigError::Invalid`] when it is not an http(s) URL.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::Missing {
                key: "api.base_url",
                env: "DESK_API__BASE_URL",
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "api.base_url",
                value: self.base_url.clone(),
                reason: "expected an http:// or https:// URL",
            });
        }
        Ok(self.base_url.trim_end_matches('/'))
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
