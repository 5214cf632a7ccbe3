use base64::Engine as _;
use chrono::{DateTime, Utc};
use desk_core::identity::UserProfile;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Tokens issued by the identity provider for one signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token sent to the API. May be empty when only a refresh token
    /// survived (e.g. an expired access cookie).
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenSet {
    #[must_use]
    pub fn from_access_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            id_token: None,
            refresh_token: None,
        }
    }

    /// Expiry of the access token, if it is a JWT with an `exp` claim.
    #[must_use]
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        decode_expiry(&self.access_token).ok()
    }

    /// True when the access token is missing, has no readable `exp`, or
    /// expires within `buffer_secs`.
    #[must_use]
    pub fn needs_refresh(&self, buffer_secs: i64) -> bool {
        self.access_expires_at().is_none_or(|expires_at| {
            expires_at <= Utc::now() + chrono::TimeDelta::seconds(buffer_secs)
        })
    }

    /// True when the access token is empty or its `exp` has already passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        if self.access_token.is_empty() {
            return true;
        }
        self.access_expires_at()
            .is_some_and(|expires_at| expires_at <= Utc::now())
    }

    /// Combine with tokens from a refresh grant. Refresh grants do not always
    /// return a new refresh token (or ID token); the previous ones are kept.
    #[must_use]
    pub fn merge(self, refreshed: Self) -> Self {
        Self {
            access_token: refreshed.access_token,
            id_token: refreshed.id_token.or(self.id_token),
            refresh_token: refreshed.refresh_token.or(self.refresh_token),
        }
    }

    /// Subject of the session: `sub` from the ID token, else from the access token.
    #[must_use]
    pub fn subject(&self) -> Option<String> {
        self.id_token
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.access_token.as_str()))
            .filter_map(|jwt| decode_payload(jwt).ok())
            .find_map(|claims| claims["sub"].as_str().map(str::to_string))
    }

    /// Profile from the ID token claims (`sub`, `email`, `given_name`, `family_name`).
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        let claims = decode_payload(self.id_token.as_deref()?).ok()?;
        serde_json::from_value(claims).ok()
    }
}

/// Decode the payload segment of a JWT without verifying its signature.
///
/// The API verifies every token it receives; the client only needs the claims
/// to schedule refreshes and to display who is signed in.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the JWT format is invalid or the
/// payload is not base64url-encoded JSON.
pub fn decode_payload(jwt: &str) -> Result<serde_json::Value, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))
}

/// Decode the JWT `exp` claim.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the JWT is malformed or the `exp`
/// claim is missing or out of range.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let value = decode_payload(jwt)?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::InvalidToken("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))
}
