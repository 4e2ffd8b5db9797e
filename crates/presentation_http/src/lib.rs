//! GeoView HTTP presentation layer
//!
//! Serves the map page, the per-page session API with its SSE update
//! stream, and stateless geocoding endpoints.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod sessions;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{ApiJson, ApiQuery, REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::{create_app, create_router};
pub use sessions::{BroadcastView, LiveSession, SessionLimits, SessionRegistry};
pub use state::AppState;
