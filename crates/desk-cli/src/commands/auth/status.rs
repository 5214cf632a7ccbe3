use desk_auth::TokenSet;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Default, Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<String>,
    subject: Option<String>,
    expires_at: Option<String>,
    expired: bool,
    refreshable: bool,
    storage: Option<String>,
    note: Option<String>,
}

pub fn handle(flags: &GlobalFlags, config: &desk_config::DeskConfig) -> anyhow::Result<()> {
    let status = match desk_auth::storage::from_config(&config.auth) {
        Ok(storage) => {
            let describe = storage.describe();
            match storage.load() {
                Ok(Some(tokens)) => AuthStatusResponse {
                    storage: Some(describe),
                    ..describe_tokens(&tokens)
                },
                Ok(None) => AuthStatusResponse {
                    storage: Some(describe),
                    note: Some("no stored session".into()),
                    ..AuthStatusResponse::default()
                },
                Err(error) => AuthStatusResponse {
                    storage: Some(describe),
                    note: Some(error.to_string()),
                    ..AuthStatusResponse::default()
                },
            }
        }
        Err(error) => AuthStatusResponse {
            note: Some(error.to_string()),
            ..AuthStatusResponse::default()
        },
    };

    output(&status, flags.format)
}

fn describe_tokens(tokens: &TokenSet) -> AuthStatusResponse {
    let expired = tokens.is_expired();
    let refreshable = tokens.refresh_token.is_some();
    let note = match (expired, refreshable) {
        (true, true) => Some("access token expired; it will be refreshed on the next request".into()),
        (true, false) => Some("session expired: run `desk auth login`".into()),
        _ => None,
    };
    AuthStatusResponse {
        authenticated: !expired || refreshable,
        user: tokens.profile().map(|profile| profile.display()),
        subject: tokens.subject(),
        expires_at: tokens.access_expires_at().map(|at| at.to_rfc3339()),
        expired,
        refreshable,
        storage: None,
        note,
    }
}
