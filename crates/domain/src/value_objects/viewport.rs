//! Map viewport and screen/coordinate conversion
//!
//! Uses the spherical mercator pixel space of a 256px tile pyramid, the same
//! projection the browser tile widget renders with. Screen points are offsets
//! in pixels from the top-left corner of the map container.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, MERCATOR_MAX_LATITUDE};
use crate::errors::DomainError;

/// Edge length of one map tile in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Highest zoom level accepted from the browser
pub const MAX_ZOOM: f64 = 22.0;

/// Largest screen offset, in pixels, accepted in either direction
pub const MAX_SCREEN_OFFSET: f64 = 100_000.0;

/// A pixel offset inside the map container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Pixels from the left edge
    pub x: f64,
    /// Pixels from the top edge
    pub y: f64,
}

impl ScreenPoint {
    /// Create a screen point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether a single offset is finite and within [`MAX_SCREEN_OFFSET`]
    #[must_use]
    pub fn offset_in_range(offset: f64) -> bool {
        offset.is_finite() && offset.abs() <= MAX_SCREEN_OFFSET
    }

    /// Whether both offsets are usable for projection
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Self::offset_in_range(self.x) && Self::offset_in_range(self.y)
    }
}

/// The visible map window: center, zoom and container size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport")]
pub struct Viewport {
    center: Coordinate,
    zoom: f64,
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawViewport {
    center: Coordinate,
    zoom: f64,
    width: f64,
    height: f64,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = DomainError;

    fn try_from(raw: RawViewport) -> Result<Self, Self::Error> {
        Self::new(raw.center, raw.zoom, raw.width, raw.height)
    }
}

impl Viewport {
    /// Create a viewport
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidViewport` if zoom is outside [0, 22] or
    /// the container size is not a positive finite number.
    pub fn new(center: Coordinate, zoom: f64, width: f64, height: f64) -> Result<Self, DomainError> {
        if !(0.0..=MAX_ZOOM).contains(&zoom) {
            return Err(DomainError::InvalidViewport(format!(
                "zoom {zoom} outside 0..={MAX_ZOOM}"
            )));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(DomainError::InvalidViewport(format!(
                "container size {width}x{height} must be positive"
            )));
        }
        Ok(Self {
            center,
            zoom,
            width,
            height,
        })
    }

    /// Center of the viewport
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Zoom level
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Container width in pixels
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Container height in pixels
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// The same viewport re-centered at `center` with `zoom` (clamped to range)
    #[must_use]
    pub fn recentered(self, center: Coordinate, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, MAX_ZOOM),
            ..self
        }
    }

    /// Convert a container pixel offset to a geographic coordinate
    ///
    /// `None` for points that are not finite or lie beyond
    /// [`MAX_SCREEN_OFFSET`].
    #[must_use]
    pub fn screen_point_to_coordinate(&self, point: ScreenPoint) -> Option<Coordinate> {
        if !point.is_valid() {
            return None;
        }
        let (cx, cy) = self.project(self.center);
        let world_x = cx + point.x - self.width / 2.0;
        let world_y = cy + point.y - self.height / 2.0;
        self.unproject(world_x, world_y)
    }

    /// Convert a geographic coordinate to a container pixel offset
    #[must_use]
    pub fn coordinate_to_screen_point(&self, coordinate: Coordinate) -> ScreenPoint {
        let (cx, cy) = self.project(self.center);
        let (px, py) = self.project(coordinate);
        ScreenPoint::new(px - cx + self.width / 2.0, py - cy + self.height / 2.0)
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    fn project(&self, coordinate: Coordinate) -> (f64, f64) {
        let size = self.world_size();
        let lat = coordinate
            .latitude()
            .clamp(-MERCATOR_MAX_LATITUDE, MERCATOR_MAX_LATITUDE);
        let sin_lat = lat.to_radians().sin();

        let x = (coordinate.longitude() + 180.0) / 360.0 * size;
        let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * size;
        (x, y)
    }

    fn unproject(&self, x: f64, y: f64) -> Option<Coordinate> {
        let size = self.world_size();
        let lon = x / size * 360.0 - 180.0;
        let n = PI - 2.0 * PI * y / size;
        let lat = n.sinh().atan().to_degrees();
        Coordinate::normalized(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_view() -> Viewport {
        Viewport::new(Coordinate::new_unchecked(0.0, 0.0), 0.0, 256.0, 256.0).expect("valid")
    }

    #[test]
    fn test_center_maps_to_container_center() {
        let center = Coordinate::new(48.8566, 2.3522).expect("valid");
        let viewport = Viewport::new(center, 12.0, 800.0, 600.0).expect("valid");

        let c = viewport
            .screen_point_to_coordinate(ScreenPoint::new(400.0, 300.0))
            .expect("in range");
        assert!((c.latitude() - 48.8566).abs() < 1e-9);
        assert!((c.longitude() - 2.3522).abs() < 1e-9);
    }

    #[test]
    fn test_world_corners_at_zoom_zero() {
        let viewport = world_view();

        let top_left = viewport
            .screen_point_to_coordinate(ScreenPoint::new(0.0, 0.0))
            .expect("in range");
        assert!((top_left.longitude() - -180.0).abs() < 1e-9);
        assert!((top_left.latitude() - MERCATOR_MAX_LATITUDE).abs() < 1e-6);

        let bottom = viewport
            .screen_point_to_coordinate(ScreenPoint::new(128.0, 256.0))
            .expect("in range");
        assert!((bottom.latitude() + MERCATOR_MAX_LATITUDE).abs() < 1e-6);
    }

    #[test]
    fn test_point_right_of_center_is_east() {
        let viewport = Viewport::new(Coordinate::new_unchecked(20.0, 0.0), 2.0, 1024.0, 768.0)
            .expect("valid");
        let c = viewport
            .screen_point_to_coordinate(ScreenPoint::new(612.0, 384.0))
            .expect("in range");
        // 100px at zoom 2 (1024px world) is 100/1024 * 360 degrees
        assert!((c.longitude() - 100.0 / 1024.0 * 360.0).abs() < 1e-9);
        assert!((c.latitude() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_points_beyond_antimeridian_wrap() {
        let viewport = Viewport::new(Coordinate::new_unchecked(0.0, 170.0), 0.0, 1024.0, 256.0)
            .expect("valid");
        let c = viewport
            .screen_point_to_coordinate(ScreenPoint::new(1000.0, 128.0))
            .expect("in range");
        assert!((-180.0..=180.0).contains(&c.longitude()));
    }

    #[test]
    fn test_coordinate_to_screen_point_inverts() {
        let viewport = Viewport::new(Coordinate::new_unchecked(51.5, -0.12), 10.0, 640.0, 480.0)
            .expect("valid");
        let target = Coordinate::new(51.52, -0.1).expect("valid");
        let point = viewport.coordinate_to_screen_point(target);
        let back = viewport
            .screen_point_to_coordinate(point)
            .expect("in range");
        assert!((back.latitude() - target.latitude()).abs() < 1e-9);
        assert!((back.longitude() - target.longitude()).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_points_are_rejected() {
        let viewport = world_view();
        for point in [
            ScreenPoint::new(1.7e308, 100.0),
            ScreenPoint::new(100.0, -1.7e308),
            ScreenPoint::new(f64::NAN, 100.0),
            ScreenPoint::new(100.0, f64::INFINITY),
            ScreenPoint::new(MAX_SCREEN_OFFSET + 1.0, 0.0),
        ] {
            assert!(viewport.screen_point_to_coordinate(point).is_none(), "{point:?}");
        }
    }

    #[test]
    fn test_points_at_offset_limit_stay_valid() {
        let viewport = world_view();
        let c = viewport
            .screen_point_to_coordinate(ScreenPoint::new(MAX_SCREEN_OFFSET, -MAX_SCREEN_OFFSET))
            .expect("in range");
        assert!(Coordinate::new(c.latitude(), c.longitude()).is_ok());
    }

    #[test]
    fn test_invalid_zoom_rejected() {
        let center = Coordinate::new_unchecked(0.0, 0.0);
        assert!(Viewport::new(center, -1.0, 100.0, 100.0).is_err());
        assert!(Viewport::new(center, 23.0, 100.0, 100.0).is_err());
    }

    #[test]
    fn test_invalid_size_rejected() {
        let center = Coordinate::new_unchecked(0.0, 0.0);
        assert!(Viewport::new(center, 2.0, 0.0, 100.0).is_err());
        assert!(Viewport::new(center, 2.0, 100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserialization_validates() {
        let ok: Result<Viewport, _> = serde_json::from_str(
            r#"{"center":{"lat":20.0,"lon":0.0},"zoom":2,"width":800,"height":600}"#,
        );
        assert!(ok.is_ok());

        let bad: Result<Viewport, _> = serde_json::from_str(
            r#"{"center":{"lat":20.0,"lon":0.0},"zoom":2,"width":0,"height":600}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_recentered_clamps_zoom() {
        let moved = world_view().recentered(Coordinate::new_unchecked(10.0, 10.0), 30.0);
        assert!((moved.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        assert!((moved.center().latitude() - 10.0).abs() < f64::EPSILON);
        assert!((moved.width() - 256.0).abs() < f64::EPSILON);
    }
}
