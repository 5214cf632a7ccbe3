use anyhow::Context;
use desk_core::entities::Comment;
use desk_core::page::{OffsetPage, SortSpec};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PageArgs;
use crate::cli::subcommands::CommentCommands;
use crate::context::{AppContext, PageContext};
use crate::notify;
use crate::output::{self, Table, Tabular, date_cell, output, page_footer};
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(transparent)]
struct CommentListResponse<'a>(&'a OffsetPage<Comment>);

impl Tabular for CommentListResponse<'_> {
    fn table(&self) -> Table {
        Table {
            headers: vec!["uid", "author", "created", "content"],
            rows: self
                .0
                .items
                .iter()
                .map(|comment| {
                    vec![
                        comment.uid.clone(),
                        comment.created_by_name.clone(),
                        date_cell(&comment.created_at),
                        comment.content.replace('\n', " "),
                    ]
                })
                .collect(),
            highlight: None,
            footer: Some(page_footer(self.0, "comments")),
        }
    }
}

#[derive(Serialize)]
struct CommentDeleteResponse<'a> {
    code: &'a str,
    uid: &'a str,
    deleted: bool,
}

/// Handle `desk comment <subcommand>`.
pub async fn handle(
    action: &CommentCommands,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommentCommands::List { code, paging } => list(code, paging, page, ctx, flags).await,
        CommentCommands::Add { code, content } => {
            let comment = ctx
                .desk
                .add_comment(code, content)
                .await
                .with_context(|| format!("Failed to add comment to case {code}"))?;
            notify::success("Comment added");
            output(&comment, flags.format)
        }
        CommentCommands::Delete { code, uid } => {
            ctx.desk
                .delete_comment(code, uid)
                .await
                .with_context(|| format!("Failed to delete comment {uid}"))?;
            notify::success("Comment deleted");
            output(
                &CommentDeleteResponse {
                    code,
                    uid,
                    deleted: true,
                },
                flags.format,
            )
        }
    }
}

async fn list(
    code: &str,
    paging: &PageArgs,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let general = &ctx.config.general;
    let request = AppContext::page_request(paging, flags, general.page_size)?;
    let sort: SortSpec = general.comment_sort.parse()?;
    let comments = with_spinner(
        &page.loading(),
        "Failed to load comments",
        ctx.desk.comments(code, request, Some(&sort)),
    )
    .await
    .with_context(|| format!("Failed to load comments of case {code}"))?;
    output::show(page, &CommentListResponse(&comments), flags.format)
}
