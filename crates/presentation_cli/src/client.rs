//! Client for a running GeoView server

use std::time::Duration;

use anyhow::{Context, bail};
use domain::PlaceResult;
use serde::Deserialize;
use tracing::debug;

/// Server health as reported by `/health`
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    #[serde(default)]
    pub sessions: u64,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

/// Thin wrapper over the server's geocoding and health endpoints
#[derive(Debug, Clone)]
pub struct ServerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    /// Create a client for `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("geoview-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> anyhow::Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => bail!("{} ({}, HTTP {status})", err.error, err.code),
                Err(_) => bail!("HTTP {status}"),
            }
        }

        response
            .json()
            .await
            .with_context(|| format!("Unexpected response from {url}"))
    }

    /// Places matching `query`
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or rejects the query.
    pub async fn search(&self, query: &str) -> anyhow::Result<Vec<PlaceResult>> {
        self.get("/v1/geocode/search", &[("q", query.to_string())])
            .await
    }

    /// Name of the place at a position
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or rejects the position.
    pub async fn reverse(&self, lat: f64, lon: f64) -> anyhow::Result<PlaceResult> {
        self.get(
            "/v1/geocode/reverse",
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
        )
        .await
    }

    /// Server health
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or unhealthy.
    pub async fn health(&self) -> anyhow::Result<Health> {
        self.get("/health", &[]).await
    }
}

/// One line per place: name and six-decimal coordinates
#[must_use]
pub fn format_place(place: &PlaceResult) -> String {
    format!(
        "{} ({:.6}, {:.6})",
        place.display_name,
        place.coordinate.latitude(),
        place.coordinate.longitude()
    )
}
