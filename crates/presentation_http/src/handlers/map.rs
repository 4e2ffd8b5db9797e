//! Map page configuration

use axum::{Json, extract::State};
use domain::{Coordinate, MapLayer, TileSource};
use serde::Serialize;

use crate::state::AppState;

/// A selectable base layer with its tile sources
#[derive(Debug, Clone, Serialize)]
pub struct LayerInfo {
    pub id: &'static str,
    pub label: &'static str,
    /// Sources stacked bottom to top
    pub sources: Vec<TileSource>,
}

impl From<MapLayer> for LayerInfo {
    fn from(layer: MapLayer) -> Self {
        Self {
            id: layer.id(),
            label: layer.label(),
            sources: layer.sources(),
        }
    }
}

/// View shown when the page loads
#[derive(Debug, Clone, Serialize)]
pub struct InitialView {
    pub center: Coordinate,
    pub zoom: f64,
}

/// Camera animation after placing a marker
#[derive(Debug, Clone, Serialize)]
pub struct FlyToInfo {
    pub zoom: f64,
    pub duration_secs: f64,
}

/// Suggestion tuning the page needs for its own input handling
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionInfo {
    pub min_query_chars: usize,
    pub max_rows: usize,
    pub debounce_ms: u128,
}

/// Everything the page needs to build the map
#[derive(Debug, Clone, Serialize)]
pub struct MapConfigResponse {
    pub layers: Vec<LayerInfo>,
    pub default_layer: MapLayer,
    pub initial_view: InitialView,
    pub fly_to: FlyToInfo,
    pub suggestions: SuggestionInfo,
}

impl MapConfigResponse {
    fn from_state(state: &AppState) -> Self {
        let session = state.sessions.config();
        let viewport = session.initial_viewport;

        Self {
            layers: MapLayer::ALL.into_iter().map(LayerInfo::from).collect(),
            default_layer: state.config.map.default_layer,
            initial_view: InitialView {
                center: viewport.center(),
                zoom: viewport.zoom(),
            },
            fly_to: FlyToInfo {
                zoom: session.fly_to.zoom,
                duration_secs: session.fly_to.duration.as_secs_f64(),
            },
            suggestions: SuggestionInfo {
                min_query_chars: session.suggestions.min_query_chars,
                max_rows: session.suggestions.max_rows,
                debounce_ms: session.suggestions.debounce.as_millis(),
            },
        }
    }
}

/// Layers, default layer and initial view
pub async fn map_config(State(state): State<AppState>) -> Json<MapConfigResponse> {
    Json(MapConfigResponse::from_state(&state))
}
