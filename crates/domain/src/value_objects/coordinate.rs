//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest latitude representable in the spherical mercator projection
pub const MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_8;

/// A geographic position with latitude and longitude
///
/// Serialized as `{"lat": .., "lon": ..}`. Deserialization validates the
/// ranges, so a `Coordinate` received over the wire is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat")]
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lon")]
    longitude: f64,
}

/// Error type for out-of-range coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinates {
    /// Rejected latitude
    pub latitude: f64,
    /// Rejected longitude
    pub longitude: f64,
}

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates ({}, {}): latitude must be -90 to 90, longitude must be -180 to 180",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN is rejected as well)
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a coordinate without validation (for trusted constants)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from arbitrary projected values
    ///
    /// Latitude is clamped to the mercator limit and longitude wrapped into
    /// [-180, 180). Used when unprojecting screen points, which may lie
    /// beyond the antimeridian or the poles. `None` for NaN or infinite
    /// input.
    #[must_use]
    pub fn normalized(latitude: f64, longitude: f64) -> Option<Self> {
        if latitude.is_nan() || !longitude.is_finite() {
            return None;
        }
        let latitude = latitude.clamp(-MERCATOR_MAX_LATITUDE, MERCATOR_MAX_LATITUDE);
        let longitude = (longitude + 180.0).rem_euclid(360.0) - 180.0;
        Some(Self {
            latitude,
            longitude,
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
