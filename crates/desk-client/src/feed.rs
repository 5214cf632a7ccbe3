//! Forward-only accumulation of the cursor-paged invitation list.

use desk_core::entities::Invitation;
use desk_core::page::CursorPage;

use crate::invitations::InvitationFilter;
use crate::{ApiClient, ApiError};

/// Anything that can load one page of invitations.
#[async_trait::async_trait]
pub trait InvitationPages: Send + Sync {
    async fn invitation_page(
        &self,
        limit: u32,
        cursor: Option<&str>,
        filter: &InvitationFilter,
    ) -> Result<CursorPage<Invitation>, ApiError>;
}

#[async_trait::async_trait]
impl InvitationPages for ApiClient {
    async fn invitation_page(
        &self,
        limit: u32,
        cursor: Option<&str>,
        filter: &InvitationFilter,
    ) -> Result<CursorPage<Invitation>, ApiError> {
        self.list_invitations(limit, cursor, filter).await
    }
}

/// Invitations loaded so far plus where to continue.
///
/// A page fetched with a cursor is appended; a page fetched without one
/// replaces everything. `next_cursor` and `has_more` always come from the
/// latest page.
#[derive(Debug, Clone, Default)]
pub struct InvitationFeed {
    filter: InvitationFilter,
    limit: u32,
    items: Vec<Invitation>,
    next_cursor: Option<String>,
    has_more: bool,
}

impl InvitationFeed {
    #[must_use]
    pub fn new(filter: InvitationFilter, limit: u32) -> Self {
        Self {
            filter,
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Invitation] {
        &self.items
    }

    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Invitation> {
        self.items
    }

    /// Fold a page fetched with `cursor` into the feed.
    pub fn apply(&mut self, cursor: Option<&str>, page: CursorPage<Invitation>) {
        if cursor.is_some() {
            self.items.extend(page.items);
        } else {
            self.items = page.items;
        }
        self.next_cursor = page.next_cursor;
        self.has_more = page.has_more;
    }

    /// Forget everything loaded. Used after sending or resending an invitation.
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_cursor = None;
        self.has_more = false;
    }

    /// Load the first page, replacing the feed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; the feed is left unchanged.
    pub async fn refresh(&mut self, source: &dyn InvitationPages) -> Result<(), ApiError> {
        let page = source.invitation_page(self.limit, None, &self.filter).await?;
        self.apply(None, page);
        Ok(())
    }

    /// Load the page after `next_cursor` and append it. Returns `false`
    /// without a request when there is nothing more to load.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; the feed is left unchanged.
    pub async fn fetch_next(&mut self, source: &dyn InvitationPages) -> Result<bool, ApiError> {
        let Some(cursor) = self.next_cursor.clone().filter(|_| self.has_more) else {
            return Ok(false);
        };
        let page = source
            .invitation_page(self.limit, Some(&cursor), &self.filter)
            .await?;
        self.apply(Some(&cursor), page);
        Ok(true)
    }

    /// Load the first page and follow cursors until `has_more` is false.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`]; pages loaded before it are kept.
    pub async fn load_all(&mut self, source: &dyn InvitationPages) -> Result<(), ApiError> {
        self.refresh(source).await?;
        while self.fetch_next(source).await? {}
        Ok(())
    }
}
