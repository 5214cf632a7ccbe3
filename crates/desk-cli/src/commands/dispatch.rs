use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::cli::subcommands::{CaseCommands, CommentCommands, FileCommands, InvitationCommands};
use crate::commands;
use crate::context::{AppContext, PageContext};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let page = page_for(&command);
    match command {
        Commands::Case { action } => commands::case::handle(&action, &page, ctx, flags).await,
        Commands::File { action } => commands::file::handle(&action, &page, ctx, flags).await,
        Commands::Comment { action } => commands::comment::handle(&action, &page, ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, &page, ctx, flags).await,
        Commands::Invitation { action } => {
            commands::invitation::handle(&action, &page, ctx, flags).await
        }
        Commands::Schema(_) | Commands::Config | Commands::Auth { .. } => {
            unreachable!("schema/config/auth are pre-dispatched in main")
        }
    }
}

/// The view each command renders.
fn page_for(command: &Commands) -> PageContext {
    match command {
        Commands::Case { action } => match action {
            CaseCommands::List(_) => PageContext::new("Cases"),
            CaseCommands::Show { code }
            | CaseCommands::Delete { code }
            | CaseCommands::Lock { code }
            | CaseCommands::Unlock { code }
            | CaseCommands::LockStatus { code }
            | CaseCommands::Approve { code }
            | CaseCommands::Reject { code }
            | CaseCommands::SetStatus { code, .. } => PageContext::for_case("Case", code),
        },
        Commands::File { action } => match action {
            FileCommands::List { code, .. }
            | FileCommands::Upload { code, .. }
            | FileCommands::Download { code, .. }
            | FileCommands::DownloadUrl { code, .. }
            | FileCommands::Delete { code, .. } => PageContext::for_case("Files", code),
        },
        Commands::Comment { action } => match action {
            CommentCommands::List { code, .. }
            | CommentCommands::Add { code, .. }
            | CommentCommands::Delete { code, .. } => PageContext::for_case("Comments", code),
        },
        Commands::History(args) => PageContext::for_case("History", &args.code),
        Commands::Invitation { action } => match action {
            InvitationCommands::Get { uid } | InvitationCommands::Accept { uid, .. } => {
                PageContext::new(format!("Invitation {uid}"))
            }
            InvitationCommands::List { .. }
            | InvitationCommands::Send { .. }
            | InvitationCommands::Resend { .. } => PageContext::new("Invitations"),
        },
        Commands::Auth { .. } => PageContext::new("Account"),
        Commands::Schema(_) => PageContext::new("Schema"),
        Commands::Config => PageContext::new("Configuration"),
    }
}
