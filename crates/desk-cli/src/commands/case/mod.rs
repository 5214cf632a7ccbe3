mod delete;
mod list;
mod lock;
mod show;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CaseCommands;
use crate::context::{AppContext, PageContext};

/// Handle `desk case <subcommand>`.
pub async fn handle(
    action: &CaseCommands,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CaseCommands::List(args) => list::run(args, page, ctx, flags).await,
        CaseCommands::Show { code } => show::run(code, page, ctx, flags).await,
        CaseCommands::Delete { code } => delete::run(code, ctx, flags).await,
        CaseCommands::Lock { code } => lock::lock(code, ctx, flags).await,
        CaseCommands::Unlock { code } => lock::unlock(code, ctx, flags).await,
        CaseCommands::LockStatus { code } => lock::status(code, page, ctx, flags).await,
        CaseCommands::Approve { code } => status::approve(code, ctx, flags).await,
        CaseCommands::Reject { code } => status::reject(code, ctx, flags).await,
        CaseCommands::SetStatus { code, status } => {
            status::set_custom(code, status, ctx, flags).await
        }
    }
}
