mod login;
mod logout;
mod status;
mod token;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `desk auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &desk_config::DeskConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login => login::handle(flags, config).await,
        AuthCommands::Token(args) => token::handle(args, flags, config),
        AuthCommands::Logout => logout::handle(flags, config),
        AuthCommands::Status => status::handle(flags, config),
    }
}
