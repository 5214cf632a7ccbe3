//! # desk-client
//!
//! Typed client for the casedesk REST API (`/v1`).
//!
//! - [`ApiClient`]: one method per endpoint, bearer auth, error classification
//! - [`uploads`]: lock → presign → PUT → complete → unlock
//! - [`feed::InvitationFeed`]: cursor accumulation for the invitation list
//! - [`service::CaseDesk`]: cached reads and write-side invalidation

pub mod cases;
pub mod comments;
pub mod feed;
pub mod files;
pub mod history;
pub mod invitations;
pub mod keys;
pub mod service;
pub mod uploads;

mod error;
mod http;

pub use error::{ApiError, describe_status};
pub use feed::InvitationFeed;
pub use service::{CaseDesk, SentInvitation};

use std::sync::Arc;

use desk_auth::AccessTokenSource;
use desk_config::ApiConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::http::check_response;

const API_PREFIX: &str = "/v1";

// ── Query strings ──────────────────────────────────────────────────

/// Ordered `key=value` pairs; `None` values are left out.
#[derive(Debug, Default, Clone)]
pub struct Query(Vec<(&'static str, String)>);

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub fn with_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    fn encode(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the casedesk API.
pub struct ApiClient {
    http: reqwest::Client,
    /// Client without auth or default headers, for presigned storage URLs.
    storage: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when `api.base_url` is missing or invalid,
    /// and [`ApiError::Http`] if the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn AccessTokenSource>) -> Result<Self, ApiError> {
        let base_url = format!("{}{API_PREFIX}", config.require_base_url()?);
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        let storage = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self {
            http,
            storage,
            base_url,
            tokens,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &Query) -> String {
        format!("{}{path}{}", self.base_url, query.encode())
    }

    /// Attach the bearer token and, for non-GET requests, the JSON content type.
    async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        query: &Query,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let mut builder = self.http.request(method.clone(), self.url(path, query));
        if let Some(token) = self.tokens.access_token().await? {
            builder = builder.bearer_auth(token);
        }
        if method != reqwest::Method::GET {
            builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json");
        }
        Ok(builder)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, ApiError> {
        let req = self.request(reqwest::Method::GET, path, query).await?;
        let resp = check_response(req.send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut req = self.request(method, path, &Query::new()).await?;
        if let Some(body) = body {
            req = req.body(serde_json::to_vec(body)?);
        }
        check_response(req.send().await?).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send_json(reqwest::Method::POST, path, Some(body))
            .await?;
        Ok(resp.json().await?)
    }

    /// POST/PUT/DELETE whose response body is ignored.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.send_json(method, path, body).await?;
        Ok(())
    }
}

/// Percent-encode one path segment (case codes and uids come from users).
pub(crate) fn seg(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
