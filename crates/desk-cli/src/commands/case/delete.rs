use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::notify;
use crate::output::output;

#[derive(Serialize)]
struct CaseDeleteResponse<'a> {
    code: &'a str,
    deleted: bool,
}

pub async fn run(code: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.desk
        .delete_case(code)
        .await
        .with_context(|| format!("Failed to delete case {code}"))?;
    notify::success(&format!("Case {code} deleted"));
    output(
        &CaseDeleteResponse {
            code,
            deleted: true,
        },
        flags.format,
    )
}
