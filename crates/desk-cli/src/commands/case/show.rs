use anyhow::Context;
use desk_client::service::{CaseOverview, OverviewPages};
use desk_config::GeneralConfig;
use desk_core::entities::{Case, CaseFile, CaseLockState, Comment, HistoryEntry};
use desk_core::enums::CaseFileStatus;
use desk_core::page::{OffsetPage, PageRequest, SortSpec};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::{AppContext, PageContext};
use crate::output::{self, Table, Tabular, date_cell};
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CaseDetailResponse<'a> {
    case: &'a Case,
    status_label: &'a str,
    can_approve: bool,
    can_reject: bool,
    lock: &'a CaseLockState,
    files: &'a OffsetPage<CaseFile>,
    comments: &'a OffsetPage<Comment>,
    history: &'a OffsetPage<HistoryEntry>,
}

impl Tabular for CaseDetailResponse<'_> {
    fn table(&self) -> Table {
        let case = self.case;
        let pending = self
            .files
            .items
            .iter()
            .filter(|file| file.status == CaseFileStatus::Pending)
            .count();
        let lock = if self.lock.is_locked {
            let by = case.locked_by.as_deref().unwrap_or("unknown");
            let at = case.locked_at.as_ref().map(date_cell).unwrap_or_default();
            format!("Locked by {by} {at}").trim_end().to_string()
        } else {
            "Unlocked".to_string()
        };
        let latest = self.history.items.first().map_or_else(
            || "-".to_string(),
            |entry| format!("{} ({})", entry.action_description, date_cell(&entry.created_at)),
        );

        let rows = [
            ("code", case.code.clone()),
            ("name", case.case_name.clone()),
            ("description", case.description.clone()),
            ("doctor", case.doctor_name()),
            ("patient", case.patient_name()),
            ("external id", case.external_id.clone().unwrap_or_default()),
            ("status", self.status_label.to_string()),
            ("lock", lock),
            ("files", format!("{} ({pending} pending)", self.files.total_count)),
            ("comments", self.comments.total_count.to_string()),
            ("last event", latest),
            ("created", date_cell(&case.created_at)),
            ("updated", date_cell(&case.updated_at)),
        ];

        Table {
            headers: vec!["field", "value"],
            rows: rows
                .into_iter()
                .map(|(field, value)| vec![field.to_string(), value])
                .collect(),
            highlight: None,
            footer: Some(if self.can_approve {
                "Approve or reject with `desk case approve|reject`".to_string()
            } else {
                "Status is final".to_string()
            }),
        }
    }
}

pub(super) fn overview_pages(general: &GeneralConfig) -> anyhow::Result<OverviewPages> {
    Ok(OverviewPages {
        files: PageRequest::first(general.page_size),
        comments: PageRequest::first(general.page_size),
        comment_sort: Some(general.comment_sort.parse::<SortSpec>()?),
        history: PageRequest::first(general.history_page_size),
    })
}

pub async fn run(
    code: &str,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let pages = overview_pages(&ctx.config.general)?;
    let CaseOverview {
        case,
        lock,
        files,
        comments,
        history,
    } = with_spinner(
        &page.loading(),
        "Failed to load case",
        ctx.desk.case_overview(code, &pages),
    )
    .await
    .with_context(|| format!("Failed to load case {code}"))?;

    let status = case.workflow_status();
    output::show(
        page,
        &CaseDetailResponse {
            case: &case,
            status_label: status.label(),
            can_approve: status.can_approve(),
            can_reject: status.can_reject(),
            lock: &lock,
            files: &files,
            comments: &comments,
            history: &history,
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use desk_config::GeneralConfig;

    use super::overview_pages;

    #[test]
    fn overview_uses_configured_page_sizes() {
        let pages = overview_pages(&GeneralConfig::default()).unwrap();
        assert_eq!(pages.files.size, 10);
        assert_eq!(pages.history.size, 50);
        assert_eq!(
            pages.comment_sort.map(|sort| sort.to_string()).as_deref(),
            Some("createdAt,asc")
        );
    }
}
