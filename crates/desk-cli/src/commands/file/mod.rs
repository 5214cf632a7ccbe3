mod delete;
mod download;
mod list;
mod upload;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FileCommands;
use crate::context::{AppContext, PageContext};

/// Handle `desk file <subcommand>`.
pub async fn handle(
    action: &FileCommands,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FileCommands::List { code, paging } => list::run(code, paging, page, ctx, flags).await,
        FileCommands::Upload { code, paths } => upload::run(code, paths, ctx, flags).await,
        FileCommands::Download {
            code,
            uids,
            dir,
            paging,
        } => download::run(code, uids, dir, paging, page, ctx, flags).await,
        FileCommands::DownloadUrl { code, uid } => download::url(code, uid, ctx, flags).await,
        FileCommands::Delete { code, uids } => delete::run(code, uids, ctx, flags).await,
    }
}
