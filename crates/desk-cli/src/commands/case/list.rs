use anyhow::Context;
use desk_client::cases::CaseListQuery;
use desk_core::entities::Case;
use desk_core::page::{OffsetPage, SortSpec};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::case::CaseListArgs;
use crate::context::{AppContext, PageContext};
use crate::output::{self, Table, Tabular, date_cell, page_footer};
use crate::progress::with_spinner;

pub(super) const CASE_HEADERS: [&str; 7] =
    ["code", "name", "doctor", "patient", "status", "lock", "updated"];

pub(super) fn case_row(case: &Case) -> Vec<String> {
    vec![
        case.code.clone(),
        case.case_name.clone(),
        case.doctor_name(),
        case.patient_name(),
        case.workflow_status().label().to_string(),
        if case.is_locked { "Locked" } else { "-" }.to_string(),
        date_cell(&case.updated_at),
    ]
}

#[derive(Serialize)]
#[serde(transparent)]
struct CaseListResponse<'a> {
    page: &'a OffsetPage<Case>,
    #[serde(skip)]
    search: Option<&'a str>,
}

impl Tabular for CaseListResponse<'_> {
    fn table(&self) -> Table {
        Table {
            headers: CASE_HEADERS.to_vec(),
            rows: self.page.items.iter().map(case_row).collect(),
            highlight: self.search.map(str::to_string),
            footer: Some(page_footer(self.page, "cases")),
        }
    }
}

pub async fn run(
    args: &CaseListArgs,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let query = build_query(args, flags, ctx.config.general.page_size)?;
    let cases = with_spinner(&page.loading(), "Failed to load cases", ctx.desk.cases(&query))
        .await
        .context("Failed to load cases")?;

    output::show(
        page,
        &CaseListResponse {
            page: &cases,
            search: query.search.as_deref().map(str::trim).filter(|q| !q.is_empty()),
        },
        flags.format,
    )
}

fn build_query(
    args: &CaseListArgs,
    flags: &GlobalFlags,
    default_size: u32,
) -> anyhow::Result<CaseListQuery> {
    let mut query = CaseListQuery::new(AppContext::page_request(&args.paging, flags, default_size)?);
    query.sort = args.sort.as_deref().map(SortSpec::for_cases).transpose()?;
    query.search.clone_from(&args.q);
    Ok(query)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use clap::Parser;
    use desk_core::entities::Case;
    use pretty_assertions::assert_eq;

    use super::{build_query, case_row};
    use crate::cli::subcommands::CaseCommands;
    use crate::cli::{Cli, Commands};

    fn parse(args: &[&str]) -> (super::CaseListArgs, crate::cli::GlobalFlags) {
        let cli = Cli::try_parse_from(args).expect("cli should parse");
        let flags = cli.global_flags();
        let Commands::Case {
            action: CaseCommands::List(list),
        } = cli.command
        else {
            panic!("expected case list");
        };
        (list, flags)
    }

    #[test]
    fn query_maps_sort_alias_and_limit() {
        let (args, flags) = parse(&["desk", "--limit", "20", "case", "list", "--sort", "patient,desc"]);
        let query = build_query(&args, &flags, 10).unwrap();
        assert_eq!(query.page.size, 20);
        assert_eq!(query.page.api_page(), 0);
        assert_eq!(query.sort.unwrap().to_string(), "patientFirstName,desc");
    }

    #[test]
    fn unsortable_column_is_rejected_locally() {
        let (args, flags) = parse(&["desk", "case", "list", "--sort", "description"]);
        assert!(build_query(&args, &flags, 10).is_err());
    }

    #[test]
    fn page_zero_is_rejected_locally() {
        let (args, flags) = parse(&["desk", "case", "list", "--page", "0"]);
        assert!(build_query(&args, &flags, 10).is_err());
    }

    #[test]
    fn row_uses_status_label() {
        let case = Case {
            code: "C-1".into(),
            description: String::new(),
            case_name: "Smith aligners".into(),
            doctor_first_name: Some("Maria".into()),
            doctor_last_name: None,
            patient_first_name: "John".into(),
            patient_last_name: "Smith".into(),
            external_id: None,
            is_locked: true,
            locked_by: Some("user-7".into()),
            locked_at: None,
            status: Some("REJECTED".into()),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        assert_eq!(
            case_row(&case),
            vec![
                "C-1",
                "Smith aligners",
                "Maria",
                "John Smith",
                "Rejected",
                "Locked",
                "1970-01-01 00:00"
            ]
        );
    }
}
