use std::path::{Path, PathBuf};

use anyhow::Context;
use desk_core::entities::CaseFile;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PageArgs;
use crate::context::{AppContext, PageContext};
use crate::notify;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DownloadResponse<'a> {
    code: &'a str,
    written: Vec<PathBuf>,
    skipped_pending: usize,
}

pub async fn run(
    code: &str,
    uids: &[String],
    dir: &Path,
    paging: &PageArgs,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let request = AppContext::page_request(paging, flags, ctx.config.general.page_size)?;
    let listed = with_spinner(
        &page.loading(),
        "Failed to load files",
        ctx.desk.case_files(code, request),
    )
    .await
    .with_context(|| format!("Failed to load files of case {code}"))?;

    let selected = select(&listed.items, uids, request.page)?;
    let (ready, _) = desk_client::files::downloadable(&selected);
    if ready.is_empty() {
        notify::warn("No uploaded files to download; pending files were skipped");
        return output(
            &DownloadResponse {
                code,
                written: Vec::new(),
                skipped_pending: selected.len(),
            },
            flags.format,
        );
    }

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let report = with_spinner(
        &format!("Downloading {} file(s)…", ready.len()),
        "Download failed",
        ctx.desk.download_files(code, &selected, dir),
    )
    .await
    .with_context(|| format!("Failed to download files of case {code}"))?;

    if report.skipped_pending > 0 {
        notify::warn(&format!(
            "Skipped {} pending file(s)",
            report.skipped_pending
        ));
    }
    output(
        &DownloadResponse {
            code,
            written: report.written,
            skipped_pending: report.skipped_pending,
        },
        flags.format,
    )
}

/// Files named by `uids`, or every listed file when none are given.
fn select(listed: &[CaseFile], uids: &[String], page: u32) -> anyhow::Result<Vec<CaseFile>> {
    if uids.is_empty() {
        return Ok(listed.to_vec());
    }
    uids.iter()
        .map(|uid| {
            listed
                .iter()
                .find(|file| &file.uid == uid)
                .cloned()
                .with_context(|| format!("file {uid} is not on page {page}"))
        })
        .collect()
}

pub async fn url(code: &str, uid: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let link = ctx
        .desk
        .client()
        .file_download_url(code, uid)
        .await
        .with_context(|| format!("Failed to get download URL for file {uid}"))?;
    output(&link, flags.format)
}
