//! Application layer - Use cases and orchestration
//!
//! Holds the map viewer's interactive components (map surface, marker,
//! popup, suggestion list), the per-page [`MapSession`] that wires browser
//! events to them, and the ports through which they reach geocoding and the
//! browser view.

pub mod error;
pub mod events;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use events::MapEvent;
pub use ports::*;
pub use services::*;
