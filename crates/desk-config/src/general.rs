//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> u32 {
    10
}

const fn default_history_page_size() -> u32 {
    50
}

fn default_comment_sort() -> String {
    "createdAt".to_string()
}

const fn default_cache_ttl_secs() -> u64 {
    30
}

const fn default_cache_capacity() -> u64 {
    1_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size for cases, files and comments.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_history_page_size")]
    pub history_page_size: u32,

    /// `limit` sent with each invitation page request.
    #[serde(default = "default_page_size")]
    pub invitation_page_size: u32,

    /// Sort applied to comment listings.
    #[serde(default = "default_comment_sort")]
    pub comment_sort: String,

    /// How long a fetched query stays fresh in the query cache.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            history_page_size: default_history_page_size(),
            invitation_page_size: default_page_size(),
            comment_sort: default_comment_sort(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}
