use anyhow::Context;
use desk_core::entities::CaseLockState;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::{AppContext, PageContext};
use crate::notify;
use crate::output::{self, Table, Tabular, output};
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LockChangeResponse<'a> {
    code: &'a str,
    is_locked: bool,
}

#[derive(Serialize)]
#[serde(transparent)]
struct LockStatusResponse<'a>(&'a CaseLockState);

impl Tabular for LockStatusResponse<'_> {
    fn table(&self) -> Table {
        let state = self.0;
        Table {
            headers: vec!["case", "lock", "can unlock"],
            rows: vec![vec![
                state.case_code.clone(),
                if state.is_locked { "Locked" } else { "Unlocked" }.to_string(),
                if state.can_be_unlocked { "yes" } else { "no" }.to_string(),
            ]],
            highlight: None,
            footer: None,
        }
    }
}

pub async fn lock(code: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.desk
        .lock_case(code)
        .await
        .with_context(|| format!("Failed to lock case {code}"))?;
    notify::success(&format!("Case {code} locked"));
    output(
        &LockChangeResponse {
            code,
            is_locked: true,
        },
        flags.format,
    )
}

pub async fn unlock(code: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.desk
        .unlock_case(code)
        .await
        .with_context(|| format!("Failed to unlock case {code}"))?;
    notify::success(&format!("Case {code} unlocked"));
    output(
        &LockChangeResponse {
            code,
            is_locked: false,
        },
        flags.format,
    )
}

pub async fn status(
    code: &str,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let state = with_spinner(
        &page.loading(),
        "Failed to load lock",
        ctx.desk.case_lock(code),
    )
    .await
    .with_context(|| format!("Failed to load lock for case {code}"))?;
    output::show(page, &LockStatusResponse(&state), flags.format)
}
