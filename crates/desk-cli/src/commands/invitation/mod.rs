mod accept;
mod list;
mod send;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::InvitationCommands;
use crate::context::{AppContext, PageContext};
use crate::output::output;

/// Handle `desk invitation <subcommand>`.
pub async fn handle(
    action: &InvitationCommands,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InvitationCommands::List {
            all,
            cursor,
            email,
            status,
        } => {
            let options = list::ListOptions {
                all: *all,
                cursor: cursor.as_deref(),
                email: email.as_deref(),
                status: status.as_deref(),
            };
            list::run(&options, page, ctx, flags).await
        }
        InvitationCommands::Get { uid } => {
            let invitation = ctx
                .desk
                .invitation(uid)
                .await
                .with_context(|| format!("Failed to load invitation {uid}"))?;
            output(&*invitation, flags.format)
        }
        InvitationCommands::Send { email } => send::run(email, send::Mode::Send, ctx, flags).await,
        InvitationCommands::Resend { email } => {
            send::run(email, send::Mode::Resend, ctx, flags).await
        }
        InvitationCommands::Accept {
            uid,
            password,
            confirm,
        } => accept::run(uid, password, confirm, ctx, flags).await,
    }
}
