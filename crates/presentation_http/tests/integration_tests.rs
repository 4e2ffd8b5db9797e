//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::{sync::Arc, time::Duration};

use application::{
    AlertKind, ApplicationError, GeocodingPort, MapSessionConfig, SuggestionSettings, ViewUpdate,
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use domain::{Coordinate, PlaceResult};
use infrastructure::AppConfig;
use presentation_http::{AppState, SessionLimits, SessionRegistry, create_app};
use serde_json::{Value, json};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Geocoder answering from a fixed gazetteer
struct MockGeocoder;

#[async_trait]
impl GeocodingPort for MockGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<PlaceResult>, ApplicationError> {
        match query {
            "Paris" => Ok(vec![
                PlaceResult::new(
                    "Paris, France",
                    Coordinate::new(48.8566, 2.3522).expect("valid coordinate"),
                ),
                PlaceResult::new(
                    "Paris, Texas, USA",
                    Coordinate::new(33.6609, -95.5555).expect("valid coordinate"),
                ),
            ]),
            "offline" => Err(ApplicationError::Network(
                "error sending request for url (https://nominatim.example/search)".to_string(),
            )),
            _ => Ok(Vec::new()),
        }
    }

    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<PlaceResult, ApplicationError> {
        if coordinate.latitude() > 80.0 {
            return Ok(PlaceResult::unknown_at(coordinate));
        }
        Ok(PlaceResult::new("Somewhere, Earth", coordinate))
    }
}

fn create_test_state() -> AppState {
    let config = AppConfig::default();
    let geocoder: Arc<dyn GeocodingPort> = Arc::new(MockGeocoder);
    let session_config = MapSessionConfig {
        suggestions: SuggestionSettings {
            debounce: Duration::ZERO,
            ..SuggestionSettings::default()
        },
        ..config.session_config().expect("default config is valid")
    };

    AppState {
        sessions: Arc::new(SessionRegistry::new(
            geocoder.clone(),
            session_config,
            SessionLimits::default(),
        )),
        geocoder,
        config: Arc::new(config),
    }
}

fn create_test_server() -> (TestServer, AppState) {
    let state = create_test_state();
    let server = TestServer::new(create_app(state.clone())).expect("Failed to create test server");
    (server, state)
}

async fn create_session(server: &TestServer) -> Uuid {
    let response = server.post("/v1/sessions").await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["session_id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("session id")
}

async fn subscribe(state: &AppState, id: Uuid) -> broadcast::Receiver<ViewUpdate> {
    state
        .sessions
        .get(id)
        .await
        .expect("session exists")
        .subscribe()
}

/// Collect updates until `done` matches one
async fn collect_until(
    rx: &mut broadcast::Receiver<ViewUpdate>,
    done: impl Fn(&ViewUpdate) -> bool,
) -> Vec<ViewUpdate> {
    let mut updates = Vec::new();
    loop {
        let update = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for update")
            .expect("update channel closed");
        let finished = done(&update);
        updates.push(update);
        if finished {
            return updates;
        }
    }
}

// ============ Page and Health Tests ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (server, _) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert!(body["sessions"].is_number());
}

#[tokio::test]
async fn index_page_is_served() {
    let (server, _) = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("search-input"));
}

#[tokio::test]
async fn assets_have_content_types() {
    let (server, _) = create_test_server();

    let js = server.get("/assets/app.js").await;
    let css = server.get("/assets/style.css").await;

    js.assert_status_ok();
    assert!(
        js.header("content-type")
            .to_str()
            .expect("ascii header")
            .starts_with("text/javascript")
    );
    css.assert_status_ok();
    assert!(
        css.header("content-type")
            .to_str()
            .expect("ascii header")
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn request_id_is_echoed() {
    let (server, _) = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("it-42"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "it-42");
}

// ============ Map Config Tests ============

#[tokio::test]
async fn map_config_lists_layers_and_initial_view() {
    let (server, _) = create_test_server();

    let response = server.get("/v1/map/config").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let labels: Vec<&str> = body["layers"]
        .as_array()
        .expect("layers array")
        .iter()
        .filter_map(|layer| layer["label"].as_str())
        .collect();
    assert_eq!(
        labels,
        [
            "Street View",
            "Satellite View",
            "Hybrid View (Satellite + Labels)",
            "Terrain View"
        ]
    );
    assert_eq!(body["default_layer"], "hybrid");
    assert_eq!(body["initial_view"]["center"]["lat"], 20.0);
    assert_eq!(body["initial_view"]["center"]["lon"], 0.0);
    assert_eq!(body["initial_view"]["zoom"], 2.0);
    assert_eq!(body["fly_to"]["zoom"], 12.0);
    assert_eq!(body["suggestions"]["max_rows"], 5);
}

// ============ Session Lifecycle Tests ============

#[tokio::test]
async fn session_can_be_created_and_deleted() {
    let (server, _) = create_test_server();
    let id = create_session(&server).await;

    server
        .delete(&format!("/v1/sessions/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/v1/sessions/{id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn events_for_unknown_session_are_not_found() {
    let (server, _) = create_test_server();

    let response = server
        .post(&format!("/v1/sessions/{}/events", Uuid::now_v7()))
        .json(&json!({"type": "outside_clicked"}))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn malformed_session_id_is_not_found() {
    let (server, _) = create_test_server();

    server
        .get("/v1/sessions/not-a-uuid/updates")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn unknown_event_type_is_rejected() {
    let (server, _) = create_test_server();
    let id = create_session(&server).await;

    let response = server
        .post(&format!("/v1/sessions/{id}/events"))
        .json(&json!({"type": "teleport"}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn out_of_range_click_is_rejected() {
    let (server, _) = create_test_server();
    let id = create_session(&server).await;

    server
        .post(&format!("/v1/sessions/{id}/events"))
        .json(&json!({"type": "map_clicked", "coordinate": {"lat": 91.0, "lon": 0.0}}))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn drag_far_outside_the_map_is_rejected() {
    let (server, _) = create_test_server();
    let id = create_session(&server).await;

    server
        .post(&format!("/v1/sessions/{id}/events"))
        .json(&json!({"type": "icon_dragged", "x": 1.7e308, "y": 100.0}))
        .await
        .assert_status_bad_request();
}

// ============ Session Event Tests ============

#[tokio::test]
async fn submitted_search_places_marker_and_shows_popup() {
    let (server, state) = create_test_server();
    let id = create_session(&server).await;
    let mut rx = subscribe(&state, id).await;

    server
        .post(&format!("/v1/sessions/{id}/events"))
        .json(&json!({"type": "search_submitted", "query": "Paris"}))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let updates = collect_until(&mut rx, |u| matches!(u, ViewUpdate::Popup(_))).await;
    let paris = Coordinate::new(48.8566, 2.3522).expect("valid coordinate");
    assert!(updates.contains(&ViewUpdate::Marker {
        coordinate: paris,
        created: true,
    }));
    let Some(ViewUpdate::Popup(content)) = updates.last() else {
        unreachable!("collect_until stops on a popup");
    };
    assert_eq!(content.location, "Location: Paris, France");
    assert_eq!(content.coordinates, "Lat: 48.856600, Lon: 2.352200");
}

#[tokio::test]
async fn search_without_results_raises_alert() {
    let (server, state) = create_test_server();
    let id = create_session(&server).await;
    let mut rx = subscribe(&state, id).await;

    server
        .post(&format!("/v1/sessions/{id}/events"))
        .json(&json!({"type": "search_submitted", "query": "zzzqqq123"}))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let updates = collect_until(&mut rx, |u| matches!(u, ViewUpdate::Alert { .. })).await;
    assert_eq!(
        updates.last(),
        Some(&ViewUpdate::alert(AlertKind::NoResults))
    );
    assert!(
        !updates
            .iter()
            .any(|u| matches!(u, ViewUpdate::Marker { .. } | ViewUpdate::Popup(_)))
    );
}

#[tokio::test]
async fn typing_shows_suggestions() {
    let (server, state) = create_test_server();
    let id = create_session(&server).await;
    let mut rx = subscribe(&state, id).await;

    server
        .post(&format!("/v1/sessions/{id}/events"))
        .json(&json!({"type": "query_changed", "query": "Paris"}))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let updates = collect_until(&mut rx, |u| matches!(u, ViewUpdate::Suggestions { .. })).await;
    let Some(ViewUpdate::Suggestions { items }) = updates.last() else {
        unreachable!("collect_until stops on suggestions");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].display_name, "Paris, France");
}

#[tokio::test]
async fn map_click_reveals_location() {
    let (server, state) = create_test_server();
    let id = create_session(&server).await;
    let mut rx = subscribe(&state, id).await;

    server
        .post(&format!("/v1/sessions/{id}/events"))
        .json(&json!({"type": "map_clicked", "coordinate": {"lat": 10.5, "lon": -20.25}}))
        .await
        .assert_status(StatusCode::ACCEPTED);

    let updates = collect_until(&mut rx, |u| matches!(u, ViewUpdate::Popup(_))).await;
    assert!(updates.iter().any(|u| matches!(u, ViewUpdate::FlyTo { .. })));
    let Some(ViewUpdate::Popup(content)) = updates.last() else {
        unreachable!("collect_until stops on a popup");
    };
    assert_eq!(content.location, "Location: Somewhere, Earth");
    assert_eq!(content.coordinates, "Lat: 10.500000, Lon: -20.250000");
}

// ============ Geocoding Endpoint Tests ============

#[tokio::test]
async fn geocode_search_returns_places() {
    let (server, _) = create_test_server();

    let response = server
        .get("/v1/geocode/search")
        .add_query_param("q", "Paris")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body[0]["display_name"], "Paris, France");
    assert_eq!(body[0]["coordinate"]["lat"], 48.8566);
}

#[tokio::test]
async fn geocode_search_rejects_blank_query() {
    let (server, _) = create_test_server();

    server
        .get("/v1/geocode/search")
        .add_query_param("q", "   ")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn geocode_search_failure_is_unavailable() {
    let (server, _) = create_test_server();

    let response = server
        .get("/v1/geocode/search")
        .add_query_param("q", "offline")
        .await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["code"], "service_unavailable");
}

#[tokio::test]
async fn geocode_reverse_returns_place() {
    let (server, _) = create_test_server();

    let response = server
        .get("/v1/geocode/reverse")
        .add_query_param("lat", "85.0")
        .add_query_param("lon", "10.0")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["display_name"], "Unknown Location");
}

#[tokio::test]
async fn geocode_reverse_rejects_invalid_coordinates() {
    let (server, _) = create_test_server();

    server
        .get("/v1/geocode/reverse")
        .add_query_param("lat", "95.0")
        .add_query_param("lon", "10.0")
        .await
        .assert_status_bad_request();

    server
        .get("/v1/geocode/reverse")
        .add_query_param("lat", "45.0")
        .await
        .assert_status_bad_request();
}
