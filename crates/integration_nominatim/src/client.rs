//! Nominatim HTTP client

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, PlaceResult};
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};

use crate::{
    config::NominatimConfig,
    error::GeocodingError,
    models::{NominatimPlace, NominatimReverse},
};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-text query to candidate places, in provider order
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, GeocodingError>;

    /// Resolve a coordinate to the nearest named place
    ///
    /// The returned place carries the requested coordinate. When the
    /// provider has no name for the location the place is "Unknown Location".
    async fn reverse_geocode(&self, coordinate: Coordinate)
    -> Result<PlaceResult, GeocodingError>;
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: NominatimConfig,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        config
            .validate()
            .map_err(GeocodingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &NominatimConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.trimmed_base_url())
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, GeocodingError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl GeocodingClient for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodingError::InvalidQuery(
                "Query must not be empty".to_string(),
            ));
        }

        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", self.config.search_limit.to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%query, "Searching places");

        let body = self.get("search", &params).await?.text().await?;
        let raw: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let places: Vec<PlaceResult> = raw
            .into_iter()
            .filter_map(|entry| match entry.into_place() {
                Ok(place) => Some(place),
                Err(e) => {
                    warn!(error = %e, "Skipping search result with malformed coordinates");
                    None
                },
            })
            .collect();

        debug!(%query, count = places.len(), "Search completed");
        Ok(places)
    }

    #[instrument(skip(self), fields(lat = coordinate.latitude(), lon = coordinate.longitude()))]
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<PlaceResult, GeocodingError> {
        let params = [
            ("lat", coordinate.latitude().to_string()),
            ("lon", coordinate.longitude().to_string()),
            ("format", "json".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];

        let body = self.get("reverse", &params).await?.text().await?;
        let raw: NominatimReverse =
            serde_json::from_str(&body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        if let Some(error) = raw.error.as_deref() {
            debug!(%error, "Provider found nothing at location");
        }

        Ok(PlaceResult::from_optional_name(raw.name(), coordinate))
    }
}
