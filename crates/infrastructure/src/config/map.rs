//! Map view, suggestion and session configuration.

use std::time::Duration;

use application::{
    FlyToSettings, MAX_SUGGESTION_ROWS, MIN_QUERY_CHARS, MapSessionConfig, SuggestionSettings,
};
use domain::{Coordinate, DomainError, MAX_ZOOM, MapLayer, Viewport};
use serde::{Deserialize, Serialize};

/// Container size assumed until the page reports its own
const DEFAULT_CONTAINER_WIDTH: f64 = 1024.0;
const DEFAULT_CONTAINER_HEIGHT: f64 = 768.0;

/// Initial map view and camera animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapAppConfig {
    /// Latitude of the initial map center
    #[serde(default = "default_initial_latitude")]
    pub initial_latitude: f64,

    /// Longitude of the initial map center
    #[serde(default)]
    pub initial_longitude: f64,

    /// Initial zoom level
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: f64,

    /// Zoom level after placing a marker from a search, suggestion or click
    #[serde(default = "default_fly_to_zoom")]
    pub fly_to_zoom: f64,

    /// Fly-to animation length in seconds
    #[serde(default = "default_fly_to_duration")]
    pub fly_to_duration_secs: f64,

    /// Layer selected when the page loads
    #[serde(default)]
    pub default_layer: MapLayer,
}

const fn default_initial_latitude() -> f64 {
    20.0
}

const fn default_initial_zoom() -> f64 {
    2.0
}

const fn default_fly_to_zoom() -> f64 {
    12.0
}

const fn default_fly_to_duration() -> f64 {
    2.0
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            initial_latitude: default_initial_latitude(),
            initial_longitude: 0.0,
            initial_zoom: default_initial_zoom(),
            fly_to_zoom: default_fly_to_zoom(),
            fly_to_duration_secs: default_fly_to_duration(),
            default_layer: MapLayer::default(),
        }
    }
}

impl MapAppConfig {
    /// Center of the initial view
    ///
    /// # Errors
    ///
    /// Returns an error if the configured center is out of range.
    pub fn initial_center(&self) -> Result<Coordinate, DomainError> {
        Ok(Coordinate::new(self.initial_latitude, self.initial_longitude)?)
    }

    /// Viewport shown before the page reports its own
    ///
    /// # Errors
    ///
    /// Returns an error if the configured center or zoom is out of range.
    pub fn initial_viewport(&self) -> Result<Viewport, DomainError> {
        Viewport::new(
            self.initial_center()?,
            self.initial_zoom,
            DEFAULT_CONTAINER_WIDTH,
            DEFAULT_CONTAINER_HEIGHT,
        )
    }

    /// Camera animation settings
    #[must_use]
    pub fn fly_to(&self) -> FlyToSettings {
        let defaults = FlyToSettings::default();
        FlyToSettings {
            zoom: self.fly_to_zoom,
            duration: Duration::try_from_secs_f64(self.fly_to_duration_secs)
                .unwrap_or(defaults.duration),
        }
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        self.initial_viewport().map_err(|e| e.to_string())?;
        if !(0.0..=MAX_ZOOM).contains(&self.fly_to_zoom) {
            return Err(format!("fly_to_zoom must be between 0 and {MAX_ZOOM}"));
        }
        if !(0.0..=60.0).contains(&self.fly_to_duration_secs) {
            return Err("fly_to_duration_secs must be between 0 and 60".to_string());
        }
        Ok(())
    }
}

/// Search suggestion tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionAppConfig {
    /// Shortest trimmed query that triggers a lookup (at least 3)
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,

    /// Maximum rows displayed (at most 5)
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Debounce interval in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

const fn default_min_query_chars() -> usize {
    MIN_QUERY_CHARS
}

const fn default_max_rows() -> usize {
    MAX_SUGGESTION_ROWS
}

const fn default_debounce_ms() -> u64 {
    300
}

impl Default for SuggestionAppConfig {
    fn default() -> Self {
        Self {
            min_query_chars: default_min_query_chars(),
            max_rows: default_max_rows(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SuggestionAppConfig {
    /// Settings for the suggestion list
    #[must_use]
    pub const fn settings(&self) -> SuggestionSettings {
        SuggestionSettings {
            min_query_chars: self.min_query_chars,
            max_rows: self.max_rows,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        if self.min_query_chars < MIN_QUERY_CHARS {
            return Err(format!("min_query_chars must be at least {MIN_QUERY_CHARS}"));
        }
        if self.max_rows == 0 || self.max_rows > MAX_SUGGESTION_ROWS {
            return Err(format!("max_rows must be between 1 and {MAX_SUGGESTION_ROWS}"));
        }
        if self.debounce_ms > 5_000 {
            return Err("debounce_ms must not exceed 5000".to_string());
        }
        Ok(())
    }
}

/// Live session limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAppConfig {
    /// Seconds without events or subscribers before a session is dropped
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Maximum number of live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

const fn default_idle_timeout_secs() -> u64 {
    30 * 60
}

const fn default_max_sessions() -> u64 {
    10_000
}

impl Default for SessionAppConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl SessionAppConfig {
    /// Idle expiry as a duration
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        if self.idle_timeout_secs == 0 {
            return Err("idle_timeout_secs must be greater than 0".to_string());
        }
        if self.max_sessions == 0 {
            return Err("max_sessions must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Combine map and suggestion settings into a per-session configuration
///
/// # Errors
///
/// Returns an error if the initial view is invalid.
pub fn session_config(
    map: &MapAppConfig,
    suggestions: &SuggestionAppConfig,
) -> Result<MapSessionConfig, DomainError> {
    Ok(MapSessionConfig {
        initial_viewport: map.initial_viewport()?,
        fly_to: map.fly_to(),
        suggestions: suggestions.settings(),
    })
}
