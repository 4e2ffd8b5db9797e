//! Raw Nominatim response models

use domain::{Coordinate, PlaceResult};
use serde::Deserialize;

use crate::error::GeocodingError;

/// One entry of a `/search` response
///
/// Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    /// Full display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Latitude as a decimal string
    pub lat: String,
    /// Longitude as a decimal string
    pub lon: String,
}

impl NominatimPlace {
    /// Parse the string coordinates
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if either value is not a number or out of range.
    pub fn coordinate(&self) -> Result<Coordinate, GeocodingError> {
        parse_coordinate(&self.lat, &self.lon)
    }

    /// Convert into a domain place
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the coordinates are malformed.
    pub fn into_place(self) -> Result<PlaceResult, GeocodingError> {
        let coordinate = self.coordinate()?;
        Ok(PlaceResult::from_optional_name(self.display_name, coordinate))
    }
}

/// A `/reverse` response
///
/// When nothing is found Nominatim answers `200 {"error": "Unable to geocode"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimReverse {
    /// Full display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Latitude of the matched object
    #[serde(default)]
    pub lat: Option<String>,
    /// Longitude of the matched object
    #[serde(default)]
    pub lon: Option<String>,
    /// Provider error message
    #[serde(default)]
    pub error: Option<String>,
}

impl NominatimReverse {
    /// Name of the matched object, if the provider found one
    #[must_use]
    pub fn name(&self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        self.display_name.clone()
    }
}

pub(crate) fn parse_coordinate(lat: &str, lon: &str) -> Result<Coordinate, GeocodingError> {
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| GeocodingError::ParseError(format!("Invalid latitude '{lat}'")))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| GeocodingError::ParseError(format!("Invalid longitude '{lon}'")))?;
    Coordinate::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))
}
