//! Geocoding service port
//!
//! Defines the interface for forward and reverse place lookups. Adapters in
//! the infrastructure layer implement this port using a geocoding provider.

use async_trait::async_trait;
use domain::{Coordinate, PlaceResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for geocoding operations
///
/// Implementations perform exactly one provider request per call; there is
/// no retry or caching behind this interface.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a free-text query to candidate places in provider order
    ///
    /// An empty list means the provider found nothing and is not an error.
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, ApplicationError>;

    /// Resolve a coordinate to the nearest named place
    ///
    /// The result carries the requested coordinate; a missing provider name
    /// yields "Unknown Location".
    async fn reverse_geocode(&self, coordinate: Coordinate)
    -> Result<PlaceResult, ApplicationError>;
}
