//! Case endpoints: list, detail, delete, lock and status.

use desk_core::entities::{Case, CaseLockState};
use desk_core::page::{OffsetPage, PageRequest, SortSpec};
use reqwest::Method;
use serde::Serialize;

use crate::{ApiClient, ApiError, Query, seg};

/// Parameters of `GET /cases`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseListQuery {
    pub page: PageRequest,
    pub sort: Option<SortSpec>,
    /// Free-text search; blank is treated as absent.
    pub search: Option<String>,
}

impl CaseListQuery {
    #[must_use]
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            sort: None,
            search: None,
        }
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .with("page", self.page.api_page())
            .with("size", self.page.size)
            .with_opt("sort", self.sort.as_ref())
            .with_opt("q", self.search_term())
    }
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

impl ApiClient {
    /// `GET /cases`. The 1-indexed page is sent as `page - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn list_cases(&self, query: &CaseListQuery) -> Result<OffsetPage<Case>, ApiError> {
        self.get("/cases", &query.to_query()).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the case does not exist.
    pub async fn get_case(&self, code: &str) -> Result<Case, ApiError> {
        self.get(&format!("/cases/{}", seg(code)), &Query::new()).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn delete_case(&self, code: &str) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, &format!("/cases/{}", seg(code)), None)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn get_case_lock(&self, code: &str) -> Result<CaseLockState, ApiError> {
        self.get(&format!("/cases/{}/lock", seg(code)), &Query::new())
            .await
    }

    /// `POST /cases/{code}/lock`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the case is locked by someone else.
    pub async fn lock_case(&self, code: &str) -> Result<(), ApiError> {
        self.execute::<()>(Method::POST, &format!("/cases/{}/lock", seg(code)), None)
            .await
    }

    /// `DELETE /cases/{code}/lock`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn unlock_case(&self, code: &str) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, &format!("/cases/{}/lock", seg(code)), None)
            .await
    }

    /// `PUT /cases/{code}/status` with `{status}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the server rejects it.
    pub async fn update_case_status(&self, code: &str, status: &str) -> Result<(), ApiError> {
        self.execute(
            Method::PUT,
            &format!("/cases/{}/status", seg(code)),
            Some(&StatusBody { status }),
        )
        .await
    }
}
