use anyhow::Context;
use desk_client::InvitationFeed;
use desk_client::feed::InvitationPages;
use desk_client::invitations::InvitationFilter;
use desk_core::entities::Invitation;
use desk_core::enums::InvitationStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::{AppContext, PageContext, effective_limit};
use crate::output::{self, Table, Tabular, date_cell};
use crate::progress::with_spinner;

pub struct ListOptions<'a> {
    pub all: bool,
    pub cursor: Option<&'a str>,
    pub email: Option<&'a str>,
    pub status: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InvitationListResponse<'a> {
    pub items: &'a [Invitation],
    pub next_cursor: Option<&'a str>,
    pub has_more: bool,
}

impl<'a> InvitationListResponse<'a> {
    pub fn of(feed: &'a InvitationFeed) -> Self {
        Self {
            items: feed.items(),
            next_cursor: feed.next_cursor(),
            has_more: feed.has_more(),
        }
    }
}

impl Tabular for InvitationListResponse<'_> {
    fn table(&self) -> Table {
        let footer = match self.next_cursor.filter(|_| self.has_more) {
            Some(cursor) => format!(
                "{} invitation(s); more with --cursor {cursor} or --all",
                self.items.len()
            ),
            None => format!("{} invitation(s)", self.items.len()),
        };
        Table {
            headers: vec!["uid", "email", "status", "created", "expires", "accepted"],
            rows: self
                .items
                .iter()
                .map(|invitation| {
                    vec![
                        invitation.uid.clone(),
                        invitation.email.clone(),
                        invitation.status.as_str().to_string(),
                        date_cell(&invitation.created_at),
                        date_cell(&invitation.expires_at),
                        invitation
                            .accepted_at
                            .as_ref()
                            .map_or_else(|| "-".to_string(), date_cell),
                    ]
                })
                .collect(),
            highlight: None,
            footer: Some(footer),
        }
    }
}

fn filter(options: &ListOptions<'_>) -> anyhow::Result<InvitationFilter> {
    Ok(InvitationFilter {
        email: options.email.map(str::to_string),
        status: options.status.map(parse_status).transpose()?,
    })
}

fn parse_status(raw: &str) -> anyhow::Result<InvitationStatus> {
    match parse_enum::<InvitationStatus>(raw, "status")? {
        InvitationStatus::Unknown => {
            anyhow::bail!("invalid status '{raw}': expected pending, accepted, expired or cancelled")
        }
        status => Ok(status),
    }
}

pub async fn run(
    options: &ListOptions<'_>,
    page: &PageContext,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = filter(options)?;
    let limit = effective_limit(None, flags.limit, ctx.config.general.invitation_page_size);
    let mut feed = InvitationFeed::new(filter.clone(), limit);

    let load = async {
        if options.all {
            feed.load_all(&ctx.desk).await
        } else if let Some(cursor) = options.cursor {
            let next = ctx.desk.invitation_page(limit, Some(cursor), &filter).await?;
            feed.apply(Some(cursor), next);
            Ok::<(), desk_client::ApiError>(())
        } else {
            feed.refresh(&ctx.desk).await
        }
    };
    with_spinner(&page.loading(), "Failed to load invitations", load)
        .await
        .context("Failed to load invitations")?;

    output::show(page, &InvitationListResponse::of(&feed), flags.format)
}

#[cfg(test)]
mod tests {
    use desk_core::enums::InvitationStatus;

    use super::{ListOptions, filter};

    #[test]
    fn filter_parses_status() {
        let options = ListOptions {
            all: false,
            cursor: None,
            email: Some("ana@example.com"),
            status: Some("expired"),
        };
        let filter = filter(&options).unwrap();
        assert_eq!(filter.status, Some(InvitationStatus::Expired));
        assert_eq!(filter.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let options = ListOptions {
            all: false,
            cursor: None,
            email: None,
            status: Some("bogus"),
        };
        let err = filter(&options).unwrap_err();
        assert!(err.to_string().contains("invalid status 'bogus'"));
    }
}
