//! Hosted identity provider and token storage configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_scopes() -> String {
    "openid email profile".to_string()
}

const fn default_callback_port() -> u16 {
    3000
}

const fn default_login_timeout_secs() -> u64 {
    180
}

/// Where access and refresh tokens are kept between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorageKind {
    /// OS keychain, falling back to the credentials file.
    #[default]
    Keyring,
    /// `~/.casedesk/credentials` only.
    File,
    /// Cookie jar shared with a local development proxy.
    Cookie,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Hosted UI base URL of the identity provider (e.g. `https://auth.example.com`).
    #[serde(default)]
    pub domain: String,

    /// Public app client ID registered with the identity provider.
    #[serde(default)]
    pub client_id: String,

    /// Space-separated OAuth scopes requested at login.
    #[serde(default = "default_scopes")]
    pub scopes: String,

    /// Loopback port for the login callback. Must match a registered redirect URI.
    #[serde(default = "default_callback_port")]
    pub callback_port: u16,

    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,

    #[serde(default)]
    pub storage: TokenStorageKind,

    #[serde(default)]
    pub cookie: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            client_id: String::new(),
            scopes: default_scopes(),
            callback_port: default_callback_port(),
            login_timeout_secs: default_login_timeout_secs(),
            storage: TokenStorageKind::default(),
            cookie: CookieConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Login and refresh both need the hosted UI domain and a client ID.
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty() && !self.client_id.is_empty()
    }

    pub const fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/callback", self.callback_port)
    }
}

/// Cookie jar mirroring for the local development proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Upper domain the cookies are scoped to (written as `.{domain}`).
    #[serde(default)]
    pub domain: String,

    /// Netscape-format jar file. Defaults to `~/.casedesk/cookies.txt`.
    #[serde(default)]
    pub jar_path: Option<PathBuf>,

    #[serde(default = "default_secure")]
    pub secure: bool,
}

const fn default_secure() -> bool {
    true
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            jar_path: None,
            secure: default_secure(),
        }
    }
}

impl CookieConfig {
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty()
    }
}
