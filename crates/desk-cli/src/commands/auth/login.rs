use anyhow::Context;
use desk_auth::browser_flow::{self, LoginRequest};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::identity_provider;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user: Option<String>,
    expires_at: Option<String>,
    storage: String,
}

pub async fn handle(flags: &GlobalFlags, config: &desk_config::DeskConfig) -> anyhow::Result<()> {
    let Some(provider) = identity_provider(config)? else {
        anyhow::bail!(
            "auth login: set auth.domain and auth.client_id (DESK_AUTH__DOMAIN, DESK_AUTH__CLIENT_ID)"
        );
    };
    let storage = desk_auth::storage::from_config(&config.auth)?;

    let redirect_uri = config.auth.redirect_uri();
    let request = LoginRequest {
        callback_port: config.auth.callback_port,
        redirect_uri: &redirect_uri,
        scopes: &config.auth.scopes,
        timeout: config.auth.login_timeout(),
    };
    let tokens = browser_flow::login(&provider, storage.as_ref(), &request)
        .await
        .context("Failed to sign in")?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            user: tokens
                .profile()
                .map(|profile| profile.display())
                .or_else(|| tokens.subject()),
            expires_at: tokens.access_expires_at().map(|at| at.to_rfc3339()),
            storage: storage.describe(),
        },
        flags.format,
    )
}
