use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use desk_auth::{IdentityProvider, TokenManager};
use desk_cache::QueryCache;
use desk_client::{ApiClient, CaseDesk};
use desk_config::{ApiConfig, DeskConfig};
use desk_core::page::PageRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PageArgs;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: DeskConfig,
    pub desk: CaseDesk,
}

impl AppContext {
    /// Wire token storage, refresh, the API client and the query cache.
    pub fn init(config: DeskConfig) -> anyhow::Result<Self> {
        let storage = desk_auth::storage::from_config(&config.auth)?;
        let provider = identity_provider(&config)?;
        if provider.is_none() {
            tracing::debug!("identity provider not configured; tokens will not be refreshed");
        }
        let tokens = Arc::new(TokenManager::new(storage, provider));

        let client = ApiClient::new(&config.api, tokens)?;
        let cache = QueryCache::new(
            config.general.cache_capacity,
            Duration::from_secs(config.general.cache_ttl_secs),
        );

        Ok(Self {
            desk: CaseDesk::new(client, cache),
            config,
        })
    }

    /// Page request from `--page`/`--size`, falling back to `--limit` and
    /// then to `fallback_size`.
    pub fn page_request(
        args: &PageArgs,
        flags: &GlobalFlags,
        fallback_size: u32,
    ) -> anyhow::Result<PageRequest> {
        let size = effective_limit(args.size, flags.limit, fallback_size);
        Ok(PageRequest::new(args.page, size)?)
    }
}

/// Identity provider client, when `auth.domain` and `auth.client_id` are set.
pub fn identity_provider(config: &DeskConfig) -> anyhow::Result<Option<IdentityProvider>> {
    if !config.auth.is_configured() {
        return Ok(None);
    }
    let http = http_client(&config.api)?;
    Ok(Some(IdentityProvider::new(
        http,
        &config.auth.domain,
        &config.auth.client_id,
    )))
}

fn http_client(api: &ApiConfig) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(api.timeout())
        .connect_timeout(api.connect_timeout())
        .user_agent(api.user_agent.clone())
        .build()
        .context("failed to build identity provider HTTP client")
}

/// Compute effective limit with precedence: local arg -> global flag -> fallback.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}
