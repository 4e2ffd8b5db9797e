//! Map surface
//!
//! Tracks the browser's viewport, dispatches map clicks to the registered
//! handler and issues fly-to animations.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, ScreenPoint, Viewport};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::ports::{ViewPort, ViewUpdate};

/// Receives coordinates of clicks on the map
#[async_trait]
pub trait MapClickHandler: Send + Sync {
    /// Handle a click at `coordinate`
    async fn on_map_click(&self, coordinate: Coordinate);
}

/// Server-side model of the page's tile-rendering widget
pub struct MapSurface {
    view: Arc<dyn ViewPort>,
    viewport: Mutex<Viewport>,
    click_handler: Mutex<Option<Arc<dyn MapClickHandler>>>,
}

impl fmt::Debug for MapSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSurface")
            .field("viewport", &*self.viewport.lock())
            .field("has_click_handler", &self.click_handler.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl MapSurface {
    /// Create a surface showing `initial`
    pub fn new(view: Arc<dyn ViewPort>, initial: Viewport) -> Self {
        Self {
            view,
            viewport: Mutex::new(initial),
            click_handler: Mutex::new(None),
        }
    }

    /// Register the click handler, replacing any previous one
    pub fn on_click(&self, handler: Arc<dyn MapClickHandler>) {
        *self.click_handler.lock() = Some(handler);
    }

    /// Deliver a click to the registered handler
    #[instrument(skip(self), fields(lat = coordinate.latitude(), lon = coordinate.longitude()))]
    pub async fn click(&self, coordinate: Coordinate) {
        let handler = self.click_handler.lock().clone();
        match handler {
            Some(handler) => handler.on_map_click(coordinate).await,
            None => debug!("Map click ignored, no handler registered"),
        }
    }

    /// Animate the map to `coordinate` at `zoom`
    pub fn fly_to(&self, coordinate: Coordinate, zoom: f64, duration: Duration) {
        let target = {
            let mut viewport = self.viewport.lock();
            *viewport = viewport.recentered(coordinate, zoom);
            *viewport
        };
        self.view.apply(ViewUpdate::FlyTo {
            coordinate,
            zoom: target.zoom(),
            duration_secs: duration.as_secs_f64(),
        });
    }

    /// Convert a container pixel offset to a coordinate in the current view
    ///
    /// `None` when the point is not finite or far outside the container.
    pub fn screen_point_to_coordinate(&self, point: ScreenPoint) -> Option<Coordinate> {
        self.viewport.lock().screen_point_to_coordinate(point)
    }

    /// Replace the tracked viewport with the one reported by the page
    pub fn update_viewport(&self, viewport: Viewport) {
        *self.viewport.lock() = viewport;
    }

    /// Current viewport
    pub fn viewport(&self) -> Viewport {
        *self.viewport.lock()
    }
}
