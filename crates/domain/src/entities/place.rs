//! Geocoded place

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Display name used when the provider has no name for a position
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A named position produced by forward or reverse geocoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Human-readable name as returned by the provider
    pub display_name: String,
    /// Position of the place
    pub coordinate: Coordinate,
}

impl PlaceResult {
    /// Create a place
    pub fn new(display_name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            display_name: display_name.into(),
            coordinate,
        }
    }

    /// A place without a known name, see [`UNKNOWN_LOCATION`]
    #[must_use]
    pub fn unknown_at(coordinate: Coordinate) -> Self {
        Self::new(UNKNOWN_LOCATION, coordinate)
    }

    /// Build a place from an optional provider name
    ///
    /// Missing or blank names fall back to [`UNKNOWN_LOCATION`].
    #[must_use]
    pub fn from_optional_name(display_name: Option<String>, coordinate: Coordinate) -> Self {
        match display_name {
            Some(name) if !name.trim().is_empty() => Self::new(name, coordinate),
            _ => Self::unknown_at(coordinate),
        }
    }

    /// Whether this place carries the unknown-location sentinel
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.display_name == UNKNOWN_LOCATION
    }
}
