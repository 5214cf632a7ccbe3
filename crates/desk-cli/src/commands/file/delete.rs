use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::notify;
use crate::output::output;

#[derive(Serialize)]
struct FileDeleteResponse<'a> {
    code: &'a str,
    deleted: usize,
}

pub async fn run(
    code: &str,
    uids: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let deleted = ctx
        .desk
        .delete_files(code, uids)
        .await
        .with_context(|| format!("Failed to delete files of case {code}"))?;
    notify::success(&format!("Deleted {deleted} file(s)"));
    output(&FileDeleteResponse { code, deleted }, flags.format)
}
