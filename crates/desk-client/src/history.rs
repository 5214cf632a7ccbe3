use desk_core::entities::HistoryEntry;
use desk_core::page::{OffsetPage, PageRequest, SortSpec};

use crate::{ApiClient, ApiError, Query, seg};

impl ApiClient {
    /// `GET /cases/{code}/history`. Entries are append-only; there is no write side.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn case_history(
        &self,
        code: &str,
        page: PageRequest,
        sort: Option<&SortSpec>,
    ) -> Result<OffsetPage<HistoryEntry>, ApiError> {
        let query = Query::new()
            .with("page", page.api_page())
            .with("size", page.size)
            .with_opt("sort", sort);
        self.get(&format!("/cases/{}/history", seg(code)), &query)
            .await
    }
}
