use desk_auth::TokenSet;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthTokenArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthTokenResponse {
    stored: bool,
    subject: Option<String>,
    expires_at: Option<String>,
    refreshable: bool,
    storage: String,
}

pub fn handle(
    args: &AuthTokenArgs,
    flags: &GlobalFlags,
    config: &desk_config::DeskConfig,
) -> anyhow::Result<()> {
    let tokens = token_set(args)?;
    let storage = desk_auth::storage::from_config(&config.auth)?;
    storage.store(&tokens)?;

    output(
        &AuthTokenResponse {
            stored: true,
            subject: tokens.subject(),
            expires_at: tokens.access_expires_at().map(|at| at.to_rfc3339()),
            refreshable: tokens.refresh_token.is_some(),
            storage: storage.describe(),
        },
        flags.format,
    )
}

fn token_set(args: &AuthTokenArgs) -> anyhow::Result<TokenSet> {
    let access_token = args.access_token.trim();
    if access_token.is_empty() {
        anyhow::bail!("auth token: --access-token cannot be empty");
    }
    let non_empty = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    Ok(TokenSet {
        access_token: access_token.to_string(),
        id_token: non_empty(&args.id_token),
        refresh_token: non_empty(&args.refresh_token),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::token_set;
    use crate::cli::subcommands::auth::AuthTokenArgs;

    #[test]
    fn blank_optional_tokens_are_dropped() {
        let tokens = token_set(&AuthTokenArgs {
            access_token: " abc ".into(),
            refresh_token: Some("  ".into()),
            id_token: None,
        })
        .unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token, None);
    }

    #[test]
    fn blank_access_token_is_rejected() {
        let args = AuthTokenArgs {
            access_token: "   ".into(),
            refresh_token: Some("r".into()),
            id_token: None,
        };
        assert!(token_set(&args).is_err());
    }
}
