//! Nominatim client configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Largest `limit` Nominatim accepts for `/search`
const MAX_SEARCH_LIMIT: u8 = 40;

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header; Nominatim rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Preferred result language (`accept-language` parameter)
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Comma-separated ISO country codes to restrict results (empty = worldwide)
    #[serde(default)]
    pub country_filter: String,

    /// Maximum number of results requested per forward search
    #[serde(default = "default_search_limit")]
    pub search_limit: u8,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!(
        "GeoView/{} (+https://github.com/geoview/geoview)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_accept_language() -> String {
    "en".to_string()
}

const fn default_search_limit() -> u8 {
    10
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            country_filter: String::new(),
            search_limit: default_search_limit(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration pointing at a mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url '{}' is not a valid URL: {e}", self.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("base_url must use http or https, got '{}'", url.scheme()));
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        if self.search_limit == 0 || self.search_limit > MAX_SEARCH_LIMIT {
            return Err(format!("search_limit must be between 1 and {MAX_SEARCH_LIMIT}"));
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
