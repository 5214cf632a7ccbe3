use anyhow::Context;
use desk_core::enums::CaseStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::notify;
use crate::output::output;

#[derive(Debug, PartialEq, Eq, Serialize)]
struct StatusChangeResponse<'a> {
    code: &'a str,
    status: &'a str,
    label: &'a str,
}

impl<'a> StatusChangeResponse<'a> {
    fn of(code: &'a str, status: &'a CaseStatus) -> Self {
        Self {
            code,
            status: status.as_wire().unwrap_or_default(),
            label: status.label(),
        }
    }
}

pub async fn approve(code: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.desk
        .approve(code)
        .await
        .with_context(|| format!("Failed to approve case {code}"))?;
    notify::success(&format!("Case {code} approved"));
    respond(code, CaseStatus::Approved, flags)
}

pub async fn reject(code: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.desk
        .reject(code)
        .await
        .with_context(|| format!("Failed to reject case {code}"))?;
    notify::success(&format!("Case {code} rejected"));
    respond(code, CaseStatus::Rejected, flags)
}

pub async fn set_custom(
    code: &str,
    raw: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = ctx
        .desk
        .set_custom_status(code, raw)
        .await
        .with_context(|| format!("Failed to update status of case {code}"))?;
    notify::success(&format!("Case {code} status set to {status}"));
    respond(code, status, flags)
}

fn respond(code: &str, status: CaseStatus, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&StatusChangeResponse::of(code, &status), flags.format)
}
