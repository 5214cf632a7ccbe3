use anyhow::Context;
use desk_client::InvitationFeed;
use desk_client::invitations::InvitationFilter;
use desk_core::entities::Invitation;
use serde::Serialize;

use super::list::InvitationListResponse;
use crate::cli::GlobalFlags;
use crate::context::{AppContext, effective_limit};
use crate::notify;
use crate::output::output;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Send,
    Resend,
}

#[derive(Serialize)]
struct SendResponse<'a> {
    invitation: &'a Invitation,
    /// First page of the list after the send, as it now reads.
    recent: InvitationListResponse<'a>,
}

pub async fn run(
    email: &str,
    mode: Mode,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.invitation_page_size);
    let mut feed = InvitationFeed::new(InvitationFilter::default(), limit);

    let verb = match mode {
        Mode::Send => "send",
        Mode::Resend => "resend",
    };
    let sent = ctx
        .desk
        .send_invitation(email, &mut feed)
        .await
        .with_context(|| format!("Failed to {verb} invitation to {email}"))?;
    let invitation = sent.invitation;

    notify::success(&match mode {
        Mode::Send => format!("Invitation sent to {}", invitation.email),
        Mode::Resend => format!("Invitation resent to {}", invitation.email),
    });
    if let Err(error) = sent.reload {
        notify::warn(&format!("Failed to load invitations: {error}"));
    }
    output(
        &SendResponse {
            invitation: &invitation,
            recent: InvitationListResponse::of(&feed),
        },
        flags.format,
    )
}
