use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in via the identity provider's hosted page in a browser.
    Login,
    /// Store tokens obtained elsewhere (CI, headless machines).
    Token(AuthTokenArgs),
    /// Clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthTokenArgs {
    /// Access token sent as the bearer token.
    #[arg(long)]
    pub access_token: String,
    /// Refresh token used to renew the access token.
    #[arg(long)]
    pub refresh_token: Option<String>,
    /// ID token carrying the user profile.
    #[arg(long)]
    pub id_token: Option<String>,
}
