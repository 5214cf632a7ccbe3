use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Signed-in user as described by the identity provider's ID token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserProfile {
    /// Subject (`sub` claim).
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
}

impl UserProfile {
    /// `email (Given Family)`, or just the email when either name is missing.
    #[must_use]
    pub fn display(&self) -> String {
        if self.given_name.is_empty() || self.family_name.is_empty() {
            self.email.clone()
        } else {
            format!("{} ({} {})", self.email, self.given_name, self.family_name)
        }
    }
}
