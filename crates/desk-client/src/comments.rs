use desk_core::entities::{Comment, NewComment};
use desk_core::page::{OffsetPage, PageRequest, SortSpec};
use reqwest::Method;

use crate::{ApiClient, ApiError, Query, seg};

impl ApiClient {
    /// `GET /cases/{code}/comments`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn list_comments(
        &self,
        code: &str,
        page: PageRequest,
        sort: Option<&SortSpec>,
    ) -> Result<OffsetPage<Comment>, ApiError> {
        let query = Query::new()
            .with("page", page.api_page())
            .with("size", page.size)
            .with_opt("sort", sort);
        self.get(&format!("/cases/{}/comments", seg(code)), &query)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn add_comment(&self, code: &str, comment: &NewComment) -> Result<Comment, ApiError> {
        self.post(&format!("/cases/{}/comments", seg(code)), comment)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn delete_comment(&self, code: &str, uid: &str) -> Result<(), ApiError> {
        self.execute::<()>(
            Method::DELETE,
            &format!("/cases/{}/comments/{}", seg(code), seg(uid)),
            None,
        )
        .await
    }
}
