use anyhow::Context;
use desk_core::entities::CaseFile;
use desk_core::page::OffsetPage;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PageArgs;
use crate::context::{AppContext, PageContext};
use crate::output::{self, Table, Tabular, date_cell, page_footer};
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(transparent)]
struct FileListResponse<'a>(&'a OffsetPage<CaseFile>);

impl Tabular for FileListResponse<'_> {
    fn table(&self) -> Table {
        Table {
            headers: vec!["uid", "name", "status", "updated"],
            rows: self
                .0
                .items
                .iter()
                .map(|file| {
                    vec![
                        file.uid.clone(),
                        file.file_name().to_string(),
                        file.status.label().to_string(),
                        date_cell(&file.updated_at),
                    ]
                })
                .collect(),
            highlight: None,
            footer: Some(page_footer(self.0, "files")),
        }
    }
}

pub async fn run(
    code: &str,
    paging: &PageArgs,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = AppContext::page_request(paging, flags, ctx.config.general.page_size)?;
    let files = with_spinner(
        &page.loading(),
        "Failed to load files",
        ctx.desk.case_files(code, request),
    )
    .await
    .with_context(|| format!("Failed to load files of case {code}"))?;
    output::show(page, &FileListResponse(&files), flags.format)
}
