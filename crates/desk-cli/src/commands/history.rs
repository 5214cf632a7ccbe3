use anyhow::Context;
use desk_core::entities::HistoryEntry;
use desk_core::page::{OffsetPage, SortSpec};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::context::{AppContext, PageContext};
use crate::output::{self, Table, Tabular, date_cell, page_footer};
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(transparent)]
struct HistoryResponse<'a>(&'a OffsetPage<HistoryEntry>);

impl Tabular for HistoryResponse<'_> {
    fn table(&self) -> Table {
        Table {
            headers: vec!["when", "actor", "event", "description"],
            rows: self
                .0
                .items
                .iter()
                .map(|entry| {
                    vec![
                        date_cell(&entry.created_at),
                        entry.actor_full_name.clone(),
                        entry.event_type.clone(),
                        entry.action_description.clone(),
                    ]
                })
                .collect(),
            highlight: None,
            footer: Some(page_footer(self.0, "events")),
        }
    }
}

/// Handle `desk history`.
pub async fn handle(
    args: &HistoryArgs,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request =
        AppContext::page_request(&args.paging, flags, ctx.config.general.history_page_size)?;
    let sort = args.sort.as_deref().map(str::parse::<SortSpec>).transpose()?;
    let history = with_spinner(
        &page.loading(),
        "Failed to load history",
        ctx.desk.history(&args.code, request, sort.as_ref()),
    )
    .await
    .with_context(|| format!("Failed to load history of case {}", args.code))?;
    output::show(page, &HistoryResponse(&history), flags.format)
}
