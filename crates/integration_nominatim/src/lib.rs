//! Nominatim geocoding integration for GeoView
//!
//! Resolves free-text place names to coordinates and coordinates to
//! human-readable names via the [Nominatim](https://nominatim.openstreetmap.org)
//! API (OpenStreetMap).
//!
//! # Architecture
//!
//! [`GeocodingClient`] defines the interface for forward and reverse lookups,
//! implemented by [`NominatimClient`]. Every call is a single independent
//! HTTP request: there is no retry, caching or client-side throttling, so the
//! provider's usage policy applies to whoever deploys the service.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_nominatim::{GeocodingClient, NominatimClient, NominatimConfig};
//!
//! let client = NominatimClient::new(&NominatimConfig::default())?;
//! let places = client.search("Paris").await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodingClient, NominatimClient};
pub use config::NominatimConfig;
pub use error::GeocodingError;
pub use models::{NominatimPlace, NominatimReverse};
