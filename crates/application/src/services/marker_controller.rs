//! Marker controller
//!
//! Owns the single movable marker of a session.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{Coordinate, MarkerPlacement, MarkerState};
use parking_lot::Mutex;
use tracing::debug;

use super::map_surface::MapSurface;
use crate::ports::{ViewPort, ViewUpdate};

/// Camera animation used when a marker is placed with animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyToSettings {
    /// Target zoom level
    pub zoom: f64,
    /// Animation length
    pub duration: Duration,
}

impl Default for FlyToSettings {
    fn default() -> Self {
        Self {
            zoom: 12.0,
            duration: Duration::from_secs(2),
        }
    }
}

/// Places and moves the session's marker
pub struct MarkerController {
    state: Mutex<MarkerState>,
    surface: Arc<MapSurface>,
    view: Arc<dyn ViewPort>,
    fly_to: FlyToSettings,
}

impl fmt::Debug for MarkerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerController")
            .field("state", &*self.state.lock())
            .field("fly_to", &self.fly_to)
            .finish_non_exhaustive()
    }
}

impl MarkerController {
    /// Create a controller with no marker yet
    pub fn new(surface: Arc<MapSurface>, view: Arc<dyn ViewPort>, fly_to: FlyToSettings) -> Self {
        Self {
            state: Mutex::new(MarkerState::new()),
            surface,
            view,
            fly_to,
        }
    }

    /// Create the marker at `coordinate`, or move it there
    ///
    /// With `animate` the map also flies to the coordinate.
    pub fn place(&self, coordinate: Coordinate, animate: bool) -> MarkerPlacement {
        let placement = self.state.lock().place(coordinate);
        debug!(?placement, %coordinate, animate, "Marker placed");

        self.view.apply(ViewUpdate::Marker {
            coordinate,
            created: placement == MarkerPlacement::Created,
        });
        if animate {
            self.surface
                .fly_to(coordinate, self.fly_to.zoom, self.fly_to.duration);
        }
        placement
    }

    /// Current marker position, `None` before the first placement
    pub fn position(&self) -> Option<Coordinate> {
        self.state.lock().position()
    }
}
