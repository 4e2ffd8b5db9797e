//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod map_layer;
mod viewport;

pub use coordinate::{Coordinate, InvalidCoordinates, MERCATOR_MAX_LATITUDE};
pub use map_layer::{MapLayer, TileSource};
pub use viewport::{MAX_SCREEN_OFFSET, MAX_ZOOM, ScreenPoint, TILE_SIZE, Viewport};
