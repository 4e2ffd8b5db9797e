//! Map session handlers
//!
//! A page creates a session, subscribes to its update stream and posts
//! browser events. Each event is handled on its own task so a slow lookup
//! never holds up the next event.

use std::{convert::Infallible, sync::Arc, time::Duration};

use application::{MapEvent, ViewUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use tokio_stream::{StreamExt, wrappers::BroadcastStream, wrappers::errors::BroadcastStreamRecvError};
use tracing::{Instrument, Span, debug, instrument, warn};
use uuid::Uuid;

use crate::{error::ApiError, middleware::ApiJson, sessions::LiveSession, state::AppState};

/// Response to session creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

async fn lookup(state: &AppState, raw_id: &str) -> Result<Arc<LiveSession>, ApiError> {
    let id = Uuid::parse_str(raw_id).map_err(|_| ApiError::session_not_found(raw_id))?;
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::session_not_found(id))
}

/// Start a session
#[instrument(skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let live = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: live.id(),
        }),
    )
}

/// End a session, closing its update streams
#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let live = lookup(&state, &id).await?;
    state.sessions.remove(live.id()).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Accept one browser event for asynchronous handling
#[instrument(skip(state, event), fields(event = event.name()))]
pub async fn post_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(event): ApiJson<MapEvent>,
) -> Result<StatusCode, ApiError> {
    let live = lookup(&state, &id).await?;

    tokio::spawn(
        async move {
            if let Err(e) = live.session().handle(event).await {
                // Already surfaced to the page as an alert
                warn!(session_id = %live.id(), error = %e, "Map event failed");
            }
        }
        .instrument(Span::current()),
    );

    Ok(StatusCode::ACCEPTED)
}

fn to_event(item: Result<ViewUpdate, BroadcastStreamRecvError>) -> Option<Result<Event, Infallible>> {
    match item {
        Ok(update) => match Event::default().event(update.name()).json_data(&update) {
            Ok(event) => Some(Ok(event)),
            Err(e) => {
                warn!(update = update.name(), error = %e, "Failed to encode view update");
                None
            },
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(skipped, "Update stream lagged");
            None
        },
    }
}

/// Stream view updates emitted after subscribing
#[instrument(skip(state))]
pub async fn session_updates(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let live = lookup(&state, &id).await?;
    let stream = BroadcastStream::new(live.subscribe()).filter_map(to_event);
    state.sessions.keep_alive_while_subscribed(&live);
    debug!(session_id = %live.id(), "Update stream opened");

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}
