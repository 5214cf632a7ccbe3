use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::notify;
use crate::output::output;

#[derive(Serialize)]
struct AcceptResponse<'a> {
    uid: &'a str,
    accepted: bool,
}

pub async fn run(
    uid: &str,
    password: &str,
    confirmation: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.desk
        .accept_invitation(uid, password, confirmation)
        .await
        .with_context(|| format!("Failed to accept invitation {uid}"))?;
    notify::success("Invitation accepted; sign in with the new password");
    output(
        &AcceptResponse {
            uid,
            accepted: true,
        },
        flags.format,
    )
}
