//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns the
//! configuration and logging setup shared by the binaries.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigError, ENV_PREFIX, Environment, MapAppConfig, ServerConfig,
    SessionAppConfig, SuggestionAppConfig, TelemetryAppConfig,
};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
