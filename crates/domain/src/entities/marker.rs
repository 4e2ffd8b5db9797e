//! The session's single movable marker

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// What a placement did to the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPlacement {
    /// No marker existed; one was created
    Created,
    /// The existing marker was moved
    Moved,
}

/// Marker position; `None` until the first placement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkerState {
    position: Option<Coordinate>,
}

impl MarkerState {
    /// A session without a marker
    #[must_use]
    pub const fn new() -> Self {
        Self { position: None }
    }

    /// Create the marker at `coordinate` or move it there
    pub fn place(&mut self, coordinate: Coordinate) -> MarkerPlacement {
        let placement = if self.position.is_some() {
            MarkerPlacement::Moved
        } else {
            MarkerPlacement::Created
        };
        self.position = Some(coordinate);
        placement
    }

    /// Whether the marker has been created
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.position.is_some()
    }

    /// Current marker position
    #[must_use]
    pub const fn position(&self) -> Option<Coordinate> {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_marker_does_not_exist() {
        let marker = MarkerState::new();
        assert!(!marker.exists());
        assert!(marker.position().is_none());
    }

    #[test]
    fn test_first_placement_creates() {
        let mut marker = MarkerState::new();
        let c = Coordinate::new(48.8566, 2.3522).unwrap();
        assert_eq!(marker.place(c), MarkerPlacement::Created);
        assert_eq!(marker.position(), Some(c));
    }

    #[test]
    fn test_second_placement_moves() {
        let mut marker = MarkerState::new();
        marker.place(Coordinate::new(1.0, 1.0).unwrap());
        let c = Coordinate::new(2.0, 2.0).unwrap();
        assert_eq!(marker.place(c), MarkerPlacement::Moved);
        assert_eq!(marker.position(), Some(c));
    }
}
