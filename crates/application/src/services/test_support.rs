//! Fakes shared by service tests

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, PlaceResult};
use parking_lot::Mutex;

use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, ViewPort, ViewUpdate};

pub(crate) fn place(name: &str, lat: f64, lon: f64) -> PlaceResult {
    PlaceResult::new(name, Coordinate::new(lat, lon).unwrap())
}

/// View that records every update
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    updates: Mutex<Vec<ViewUpdate>>,
}

impl RecordingView {
    pub(crate) fn updates(&self) -> Vec<ViewUpdate> {
        self.updates.lock().clone()
    }

    pub(crate) fn clear(&self) {
        self.updates.lock().clear();
    }
}

impl ViewPort for RecordingView {
    fn apply(&self, update: ViewUpdate) {
        self.updates.lock().push(update);
    }
}

type SearchScript = (Duration, Result<Vec<PlaceResult>, String>);

/// Geocoder answering from a fixed script, with optional per-query latency
#[derive(Debug, Default)]
pub(crate) struct ScriptedGeocoder {
    search_script: HashMap<String, SearchScript>,
    reverse_name: Option<String>,
    reverse_delay: HashMap<String, Duration>,
    reverse_fails: bool,
    search_log: Mutex<Vec<String>>,
    reverse_log: Mutex<Vec<Coordinate>>,
}

impl ScriptedGeocoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_results(self, query: &str, places: Vec<PlaceResult>) -> Self {
        self.with_delayed_results(query, places, Duration::ZERO)
    }

    pub(crate) fn with_delayed_results(
        mut self,
        query: &str,
        places: Vec<PlaceResult>,
        delay: Duration,
    ) -> Self {
        self.search_script
            .insert(query.to_string(), (delay, Ok(places)));
        self
    }

    pub(crate) fn with_failure(mut self, query: &str) -> Self {
        self.search_script.insert(
            query.to_string(),
            (Duration::ZERO, Err("connection reset".to_string())),
        );
        self
    }

    pub(crate) fn with_reverse_name(mut self, name: &str) -> Self {
        self.reverse_name = Some(name.to_string());
        self
    }

    /// Delay reverse lookups at `coordinate`
    pub(crate) fn with_reverse_delay(mut self, coordinate: Coordinate, delay: Duration) -> Self {
        self.reverse_delay.insert(coordinate.to_string(), delay);
        self
    }

    pub(crate) fn with_reverse_failure(mut self) -> Self {
        self.reverse_fails = true;
        self
    }

    pub(crate) fn searches(&self) -> Vec<String> {
        self.search_log.lock().clone()
    }

    pub(crate) fn reverse_lookups(&self) -> Vec<Coordinate> {
        self.reverse_log.lock().clone()
    }
}

#[async_trait]
impl GeocodingPort for ScriptedGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, ApplicationError> {
        self.search_log.lock().push(query.to_string());
        let Some((delay, response)) = self.search_script.get(query).cloned() else {
            return Ok(Vec::new());
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response.map_err(ApplicationError::Network)
    }

    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<PlaceResult, ApplicationError> {
        self.reverse_log.lock().push(coordinate);
        if let Some(delay) = self.reverse_delay.get(&coordinate.to_string()) {
            tokio::time::sleep(*delay).await;
        }
        if self.reverse_fails {
            return Err(ApplicationError::Network("timed out".to_string()));
        }
        Ok(PlaceResult::from_optional_name(
            self.reverse_name.clone(),
            coordinate,
        ))
    }
}
