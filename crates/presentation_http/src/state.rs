//! Application state shared across handlers

use std::sync::Arc;

use application::GeocodingPort;
use infrastructure::AppConfig;

use crate::sessions::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Live map sessions
    pub sessions: Arc<SessionRegistry>,
    /// Geocoder for stateless lookups
    pub geocoder: Arc<dyn GeocodingPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}
