//! Geocoding adapter - Implements GeocodingPort using integration_nominatim

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::{Coordinate, DomainError, PlaceResult};
use integration_nominatim::{GeocodingClient, GeocodingError, NominatimClient, NominatimConfig};
use tracing::{debug, instrument};

/// Adapter for forward and reverse geocoding via Nominatim
pub struct NominatimGeocodingAdapter {
    client: Box<dyn GeocodingClient>,
}

impl std::fmt::Debug for NominatimGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocodingAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl NominatimGeocodingAdapter {
    /// Create an adapter talking to the configured Nominatim instance
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimClient::new(config).map_err(Self::map_error)?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn from_client(client: impl GeocodingClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::InvalidQuery(msg) => DomainError::ValidationError(msg).into(),
            GeocodingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::Network(other.to_string()),
        }
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, ApplicationError> {
        let result = self.client.search(query).await.map_err(Self::map_error);

        match &result {
            Ok(places) => debug!(count = places.len(), "Search completed"),
            Err(e) => debug!(error = %e, "Search failed"),
        }

        result
    }

    #[instrument(skip(self), fields(lat = coordinate.latitude(), lon = coordinate.longitude()))]
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<PlaceResult, ApplicationError> {
        let result = self
            .client
            .reverse_geocode(coordinate)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(place) => debug!(unknown = place.is_unknown(), "Reverse lookup completed"),
            Err(e) => debug!(error = %e, "Reverse lookup failed"),
        }

        result
    }
}
