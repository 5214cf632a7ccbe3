//! Cached facade over [`ApiClient`].
//!
//! Reads go through the [`QueryCache`] so repeated or concurrent reads of the
//! same resource share one request; every successful write invalidates the
//! scopes listed in [`Mutation::invalidations`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use desk_cache::{QueryCache, QueryKey};
use desk_core::entities::{
    Case, CaseFile, CaseLockState, Comment, HistoryEntry, Invitation, NewComment,
};
use desk_core::enums::CaseStatus;
use desk_core::errors::CoreError;
use desk_core::page::{CursorPage, OffsetPage, PageRequest, SortSpec};

use crate::cases::CaseListQuery;
use crate::feed::{InvitationFeed, InvitationPages};
use crate::invitations::{InvitationFilter, validate_acceptance};
use crate::keys::{self, Invalidation, Mutation};
use crate::uploads::LocalFile;
use crate::{ApiClient, ApiError};

/// Everything shown for one case.
#[derive(Debug, Clone)]
pub struct CaseOverview {
    pub case: Arc<Case>,
    pub lock: Arc<CaseLockState>,
    pub files: Arc<OffsetPage<CaseFile>>,
    pub comments: Arc<OffsetPage<Comment>>,
    pub history: Arc<OffsetPage<HistoryEntry>>,
}

/// Page sizes and sorts for [`CaseDesk::case_overview`].
#[derive(Debug, Clone)]
pub struct OverviewPages {
    pub files: PageRequest,
    pub comments: PageRequest,
    pub comment_sort: Option<SortSpec>,
    pub history: PageRequest,
}

/// Outcome of a multi-file download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub written: Vec<PathBuf>,
    /// Files still `PENDING`, which have nothing to download yet.
    pub skipped_pending: usize,
}

/// Result of [`CaseDesk::send_invitation`].
#[derive(Debug)]
pub struct SentInvitation {
    pub invitation: Invitation,
    /// Reload of the feed's first page after the send.
    pub reload: Result<(), ApiError>,
}

pub struct CaseDesk {
    client: ApiClient,
    cache: QueryCache,
}

impl std::fmt::Debug for CaseDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseDesk")
            .field("client", &self.client)
            .field("cache", &self.cache)
            .finish()
    }
}

impl CaseDesk {
    #[must_use]
    pub const fn new(client: ApiClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    fn record(&self, mutation: Mutation<'_>) {
        for step in mutation.invalidations() {
            match step {
                Invalidation::Scope { scope, case } => self.cache.invalidate(scope, case),
                Invalidation::Case(code) => self.cache.invalidate_case(code),
            }
        }
    }

    // ── Reads ──────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn cases(&self, query: &CaseListQuery) -> Result<Arc<OffsetPage<Case>>, ApiError> {
        let key = QueryKey::new::<OffsetPage<Case>>(keys::CASES)
            .param(query.page.page)
            .param(query.page.size)
            .opt_param(query.sort.as_ref())
            .opt_param(query.search.as_deref());
        Ok(self.cache.fetch(key, || self.client.list_cases(query)).await?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the case does not exist.
    pub async fn case(&self, code: &str) -> Result<Arc<Case>, ApiError> {
        let key = QueryKey::new::<Case>(keys::CASE).for_case(code);
        Ok(self.cache.fetch(key, || self.client.get_case(code)).await?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn case_lock(&self, code: &str) -> Result<Arc<CaseLockState>, ApiError> {
        let key = QueryKey::new::<CaseLockState>(keys::CASE_LOCK).for_case(code);
        Ok(self
            .cache
            .fetch(key, || self.client.get_case_lock(code))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn case_files(
        &self,
        code: &str,
        page: PageRequest,
    ) -> Result<Arc<OffsetPage<CaseFile>>, ApiError> {
        let key = QueryKey::new::<OffsetPage<CaseFile>>(keys::CASE_FILES)
            .for_case(code)
            .param(page.page)
            .param(page.size);
        Ok(self
            .cache
            .fetch(key, || self.client.list_case_files(code, page))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn comments(
        &self,
        code: &str,
        page: PageRequest,
        sort: Option<&SortSpec>,
    ) -> Result<Arc<OffsetPage<Comment>>, ApiError> {
        let key = QueryKey::new::<OffsetPage<Comment>>(keys::CASE_COMMENTS)
            .for_case(code)
            .param(page.page)
            .param(page.size)
            .opt_param(sort);
        Ok(self
            .cache
            .fetch(key, || self.client.list_comments(code, page, sort))
            .await?)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn history(
        &self,
        code: &str,
        page: PageRequest,
        sort: Option<&SortSpec>,
    ) -> Result<Arc<OffsetPage<HistoryEntry>>, ApiError> {
        let key = QueryKey::new::<OffsetPage<HistoryEntry>>(keys::CASE_HISTORY)
            .for_case(code)
            .param(page.page)
            .param(page.size)
            .opt_param(sort);
        Ok(self
            .cache
            .fetch(key, || self.client.case_history(code, page, sort))
            .await?)
    }

    /// Case, lock, files, comments and history, fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`] among the five reads.
    pub async fn case_overview(
        &self,
        code: &str,
        pages: &OverviewPages,
    ) -> Result<CaseOverview, ApiError> {
        let (case, lock, files, comments, history) = tokio::try_join!(
            self.case(code),
            self.case_lock(code),
            self.case_files(code, pages.files),
            self.comments(code, pages.comments, pages.comment_sort.as_ref()),
            self.history(code, pages.history, None),
        )?;
        Ok(CaseOverview {
            case,
            lock,
            files,
            comments,
            history,
        })
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the invitation does not exist.
    pub async fn invitation(&self, uid: &str) -> Result<Arc<Invitation>, ApiError> {
        let key = QueryKey::new::<Invitation>(keys::INVITATION).param(uid);
        Ok(self
            .cache
            .fetch(key, || self.client.get_invitation(uid))
            .await?)
    }

    // ── Case writes ────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn lock_case(&self, code: &str) -> Result<(), ApiError> {
        self.client.lock_case(code).await?;
        self.record(Mutation::Lock(code));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn unlock_case(&self, code: &str) -> Result<(), ApiError> {
        self.client.unlock_case(code).await?;
        self.record(Mutation::Unlock(code));
        Ok(())
    }

    /// Approve the case unless it is already approved or rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the case is in a final status,
    /// otherwise any [`ApiError`] from the reads or the update.
    pub async fn approve(&self, code: &str) -> Result<(), ApiError> {
        let status = self.case(code).await?.workflow_status();
        if !status.can_approve() {
            return Err(not_allowed(code, &status).into());
        }
        self.write_status(code, &CaseStatus::Approved).await
    }

    /// Reject the case unless it is already approved or rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the case is in a final status,
    /// otherwise any [`ApiError`] from the reads or the update.
    pub async fn reject(&self, code: &str) -> Result<(), ApiError> {
        let status = self.case(code).await?.workflow_status();
        if !status.can_reject() {
            return Err(not_allowed(code, &status).into());
        }
        self.write_status(code, &CaseStatus::Rejected).await
    }

    /// Set a free-form status. Input is trimmed; blank input is rejected
    /// before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for blank input, otherwise any
    /// [`ApiError`] from the update.
    pub async fn set_custom_status(&self, code: &str, raw: &str) -> Result<CaseStatus, ApiError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("Status cannot be empty".into()).into());
        }
        let status = CaseStatus::classify(Some(trimmed));
        self.write_status(code, &status).await?;
        Ok(status)
    }

    async fn write_status(&self, code: &str, status: &CaseStatus) -> Result<(), ApiError> {
        let Some(wire) = status.as_wire() else {
            return Err(CoreError::Validation("a case cannot be reset to open".into()).into());
        };
        self.client.update_case_status(code, wire).await?;
        self.record(Mutation::StatusChange(code));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn delete_case(&self, code: &str) -> Result<(), ApiError> {
        self.client.delete_case(code).await?;
        self.record(Mutation::CaseDelete(code));
        Ok(())
    }

    // ── Files ──────────────────────────────────────────────────────

    /// Run the upload workflow and invalidate the case's files and history.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`] of the workflow.
    pub async fn upload_files(
        &self,
        code: &str,
        files: &[LocalFile],
        on_uploaded: &(dyn Fn(&str) + Sync),
    ) -> Result<Vec<String>, ApiError> {
        let result = self.client.upload_case_files(code, files, on_uploaded).await;
        // The lock was taken and released either way.
        self.record(Mutation::Unlock(code));
        let uids = result?;
        self.record(Mutation::Upload(code));
        Ok(uids)
    }

    /// Delete files one at a time, stopping at the first failure.
    ///
    /// Returns how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of the first failed delete.
    pub async fn delete_files(&self, code: &str, uids: &[String]) -> Result<usize, ApiError> {
        let mut deleted = 0;
        for uid in uids {
            self.client.delete_case_file(code, uid).await?;
            self.record(Mutation::FileDelete(code));
            deleted += 1;
        }
        Ok(deleted)
    }

    /// Download the given files into `dir`, skipping pending ones.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] before any request when two files
    /// share a name, otherwise the first [`ApiError`] of a download.
    pub async fn download_files(
        &self,
        code: &str,
        files: &[CaseFile],
        dir: &Path,
    ) -> Result<DownloadReport, ApiError> {
        let (ready, skipped_pending) = crate::files::downloadable(files);
        crate::files::check_download_names(&ready)?;
        let mut written = Vec::with_capacity(ready.len());
        for file in ready {
            written.push(self.client.download_case_file(code, &file.uid, dir).await?);
        }
        Ok(DownloadReport {
            written,
            skipped_pending,
        })
    }

    // ── Comments ───────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a blank comment, otherwise any
    /// [`ApiError`] from the request.
    pub async fn add_comment(&self, code: &str, content: &str) -> Result<Comment, ApiError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CoreError::Validation("Comment cannot be empty".into()).into());
        }
        let comment = self
            .client
            .add_comment(
                code,
                &NewComment {
                    content: content.to_string(),
                },
            )
            .await?;
        self.record(Mutation::CommentAdd(code));
        Ok(comment)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn delete_comment(&self, code: &str, uid: &str) -> Result<(), ApiError> {
        self.client.delete_comment(code, uid).await?;
        self.record(Mutation::CommentDelete(code));
        Ok(())
    }

    // ── Invitations ────────────────────────────────────────────────

    /// Send (or resend) an invitation, then reset `feed` and reload its first page.
    ///
    /// Once the POST succeeds the invitation exists, so a failed reload is
    /// reported in [`SentInvitation::reload`] instead of as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] only when the send itself fails.
    pub async fn send_invitation(
        &self,
        email: &str,
        feed: &mut InvitationFeed,
    ) -> Result<SentInvitation, ApiError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CoreError::Validation("Email cannot be empty".into()).into());
        }
        let invitation = self.client.send_invitation(email).await?;
        self.record(Mutation::InvitationSend);
        feed.reset();
        let reload = feed.refresh(self).await;
        if let Err(error) = &reload {
            tracing::warn!(%error, "invitation sent but the list could not be reloaded");
        }
        Ok(SentInvitation { invitation, reload })
    }

    /// Accept a pending invitation after local checks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the invitation is not pending or
    /// the password is short or unconfirmed; otherwise any [`ApiError`].
    pub async fn accept_invitation(
        &self,
        uid: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), ApiError> {
        let invitation = self.invitation(uid).await?;
        validate_acceptance(&invitation, password, confirmation)?;
        self.client.accept_invitation(uid, password).await?;
        self.record(Mutation::InvitationAccept(uid));
        Ok(())
    }
}

#[async_trait::async_trait]
impl InvitationPages for CaseDesk {
    async fn invitation_page(
        &self,
        limit: u32,
        cursor: Option<&str>,
        filter: &InvitationFilter,
    ) -> Result<CursorPage<Invitation>, ApiError> {
        let key = QueryKey::new::<CursorPage<Invitation>>(keys::INVITATIONS)
            .param(cursor.unwrap_or("initial"))
            .param(limit)
            .opt_param(filter.email.as_deref())
            .opt_param(filter.status);
        let page = self
            .cache
            .fetch(key, || self.client.list_invitations(limit, cursor, filter))
            .await?;
        Ok(Arc::unwrap_or_clone(page))
    }
}

fn not_allowed(code: &str, status: &CaseStatus) -> CoreError {
    CoreError::NotAllowed {
        entity: "case".into(),
        id: code.to_string(),
        reason: format!("is already {}", status.label()),
    }
}
