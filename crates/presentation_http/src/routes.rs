//! Route definitions

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Page
        .route("/", get(handlers::pages::index))
        .route("/assets/app.js", get(handlers::pages::app_js))
        .route("/assets/style.css", get(handlers::pages::style_css))
        // Health
        .route("/health", get(handlers::health::health_check))
        // Map API (v1)
        .route("/v1/map/config", get(handlers::map::map_config))
        .route("/v1/sessions", post(handlers::sessions::create_session))
        .route("/v1/sessions/{id}", delete(handlers::sessions::delete_session))
        .route("/v1/sessions/{id}/events", post(handlers::sessions::post_event))
        .route("/v1/sessions/{id}/updates", get(handlers::sessions::session_updates))
        // Geocoding API (v1)
        .route("/v1/geocode/search", get(handlers::geocode::search))
        .route("/v1/geocode/reverse", get(handlers::geocode::reverse))
        .with_state(state)
}

/// CORS policy for the server configuration
///
/// Without configured origins, development allows any origin and
/// production stays same-origin.
pub fn cors_layer(server: &ServerConfig, production: bool) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }

    if server.allowed_origins.is_empty() {
        return (!production).then(|| {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        });
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!(%origin, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
    )
}

/// Router with tracing, request ids, body limit and CORS applied
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size_json_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new());

    match cors_layer(&config.server, config.is_production()) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}
