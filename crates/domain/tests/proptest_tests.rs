//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    Coordinate, MERCATOR_MAX_LATITUDE, PlaceResult, PopupContent, ScreenPoint, Viewport,
};
use proptest::prelude::*;

// ============================================================================
// Coordinate Property Tests
// ============================================================================

mod coordinate_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_coordinate(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = Coordinate::new(lat, lon);
            prop_assert!(result.is_ok());

            let c = result.unwrap();
            prop_assert!((c.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((c.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(Coordinate::new(lat, lon).is_err());
        }

        #[test]
        fn normalized_is_always_in_range(
            lat in -1000.0f64..1000.0f64,
            lon in -10_000.0f64..10_000.0f64
        ) {
            let c = Coordinate::normalized(lat, lon).unwrap();
            prop_assert!(c.latitude().abs() <= MERCATOR_MAX_LATITUDE);
            prop_assert!((-180.0..=180.0).contains(&c.longitude()));
        }
    }
}

// ============================================================================
// Popup Formatting Property Tests
// ============================================================================

mod popup_tests {
    use super::*;

    fn decimals(s: &str) -> usize {
        s.split('.').nth(1).map_or(0, str::len)
    }

    proptest! {
        #[test]
        fn coordinates_always_have_six_decimals(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let place = PlaceResult::new("X", Coordinate::new(lat, lon).unwrap());
            let content = PopupContent::from_place(&place);

            let rest = content.coordinates.strip_prefix("Lat: ").unwrap();
            let (lat_text, lon_text) = rest.split_once(", Lon: ").unwrap();
            prop_assert_eq!(decimals(lat_text), 6);
            prop_assert_eq!(decimals(lon_text), 6);
        }

        #[test]
        fn location_line_echoes_name(name in "[A-Za-z ,]{1,40}") {
            let place = PlaceResult::new(name.clone(), Coordinate::new(0.0, 0.0).unwrap());
            let content = PopupContent::from_place(&place);
            prop_assert_eq!(content.location, format!("Location: {name}"));
        }
    }
}

// ============================================================================
// Viewport Property Tests
// ============================================================================

mod viewport_tests {
    use super::*;

    proptest! {
        #[test]
        fn screen_points_map_into_valid_coordinates(
            lat in -80.0f64..80.0f64,
            lon in -180.0f64..=180.0f64,
            zoom in 0.0f64..=18.0f64,
            x in -2000.0f64..4000.0f64,
            y in -2000.0f64..4000.0f64
        ) {
            let center = Coordinate::new(lat, lon).unwrap();
            let viewport = Viewport::new(center, zoom, 1280.0, 720.0).unwrap();
            let c = viewport.screen_point_to_coordinate(ScreenPoint::new(x, y)).unwrap();
            prop_assert!(Coordinate::new(c.latitude(), c.longitude()).is_ok());
        }

        #[test]
        fn any_point_projects_or_is_rejected(
            zoom in 0.0f64..=22.0f64,
            x in proptest::num::f64::ANY,
            y in proptest::num::f64::ANY
        ) {
            let center = Coordinate::new(0.0, 0.0).unwrap();
            let viewport = Viewport::new(center, zoom, 1280.0, 720.0).unwrap();
            let point = ScreenPoint::new(x, y);
            match viewport.screen_point_to_coordinate(point) {
                Some(c) => prop_assert!(Coordinate::new(c.latitude(), c.longitude()).is_ok()),
                None => prop_assert!(!point.is_valid()),
            }
        }

        #[test]
        fn container_center_is_viewport_center(
            lat in -80.0f64..80.0f64,
            lon in -179.0f64..179.0f64,
            zoom in 0.0f64..=18.0f64
        ) {
            let center = Coordinate::new(lat, lon).unwrap();
            let viewport = Viewport::new(center, zoom, 1000.0, 500.0).unwrap();
            let c = viewport.screen_point_to_coordinate(ScreenPoint::new(500.0, 250.0)).unwrap();
            prop_assert!((c.latitude() - lat).abs() < 1e-6);
            prop_assert!((c.longitude() - lon).abs() < 1e-6);
        }
    }
}
