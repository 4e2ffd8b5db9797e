//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure and presentation layers
//! implement these ports.

mod geocoding_port;
mod view_port;

pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
#[cfg(test)]
pub use view_port::MockViewPort;
pub use view_port::{AlertKind, ViewPort, ViewUpdate};
