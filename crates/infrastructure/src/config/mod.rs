//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `map`: initial view, fly-to animation, suggestion tuning, session limits
//!
//! Values are layered: serde defaults, then an optional `config.toml`, then
//! `GEOVIEW_*` environment variables with `__` between nested keys
//! (e.g. `GEOVIEW_SERVER__PORT=8080`, `GEOVIEW_GEOCODING__BASE_URL=...`).

mod map;
mod server;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use application::MapSessionConfig;
use integration_nominatim::NominatimConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use map::{MapAppConfig, SessionAppConfig, SuggestionAppConfig, session_config};
pub use server::ServerConfig;

use crate::telemetry::{LogFormat, TelemetryConfig};

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "GEOVIEW";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Production hides internal error details from API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A section holds an invalid value
    #[error("Invalid configuration in [{section}]: {message}")]
    Invalid {
        /// Offending section
        section: &'static str,
        /// What is wrong
        message: String,
    },
}

/// Log filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// Log level filter (e.g., "info", "geoview=debug,tower_http=info");
    /// `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding provider configuration
    #[serde(default)]
    pub geocoding: NominatimConfig,

    /// Map view configuration
    #[serde(default)]
    pub map: MapAppConfig,

    /// Search suggestion configuration
    #[serde(default)]
    pub suggestions: SuggestionAppConfig,

    /// Session limits
    #[serde(default)]
    pub sessions: SessionAppConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load from `config.toml` in the working directory (if present) and
    /// `GEOVIEW_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(config::File::with_name("config").required(false), None)
    }

    /// Load from an explicit file plus `GEOVIEW_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path).required(true), None)
    }

    /// Load from an explicit file with the given variables in place of the
    /// process environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid, or validation fails.
    pub fn load_with_env(path: &Path, env: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(config::File::from(path).required(true), Some(env))
    }

    fn build(
        file: config::File<config::FileSourceFile, config::FileFormat>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., GEOVIEW_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(env.map(|vars| vars.into_iter().collect::<config::Map<_, _>>())),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        debug!(environment = %config.environment, "Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first invalid section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |section: &'static str| move |message: String| ConfigError::Invalid { section, message };

        self.server.validate().map_err(invalid("server"))?;
        self.geocoding.validate().map_err(invalid("geocoding"))?;
        self.map.validate().map_err(invalid("map"))?;
        self.suggestions.validate().map_err(invalid("suggestions"))?;
        self.sessions.validate().map_err(invalid("sessions"))?;
        if self.telemetry.log_filter.trim().is_empty() {
            return Err(invalid("telemetry")("log_filter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Whether this is a production deployment
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Per-session configuration derived from the map and suggestion sections
    ///
    /// # Errors
    ///
    /// Returns an error if the initial view is invalid.
    pub fn session_config(&self) -> Result<MapSessionConfig, ConfigError> {
        session_config(&self.map, &self.suggestions).map_err(|e| ConfigError::Invalid {
            section: "map",
            message: e.to_string(),
        })
    }

    /// Subscriber settings derived from the server and telemetry sections
    #[must_use]
    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_filter: self.telemetry.log_filter.clone(),
            format: if self.server.json_logs() {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
        }
    }
}
