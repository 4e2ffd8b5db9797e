//! GeoView HTTP Server
//!
//! Main entry point for the map viewer service.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::GeocodingPort;
use infrastructure::{AppConfig, NominatimGeocodingAdapter, init_telemetry};
use presentation_http::{
    AppState, SessionLimits, SessionRegistry, create_app, set_expose_internal_errors,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_telemetry(&config.telemetry_config()).context("Failed to initialize logging")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "GeoView starting"
    );

    set_expose_internal_errors(!config.is_production());

    let geocoder: Arc<dyn GeocodingPort> = Arc::new(
        NominatimGeocodingAdapter::new(&config.geocoding)
            .context("Failed to initialize geocoding client")?,
    );
    info!(
        base_url = %config.geocoding.base_url,
        timeout_secs = config.geocoding.timeout_secs,
        "Geocoding provider configured"
    );

    let sessions = SessionRegistry::new(
        Arc::clone(&geocoder),
        config.session_config()?,
        SessionLimits {
            idle_timeout: config.sessions.idle_timeout(),
            max_sessions: config.sessions.max_sessions,
        },
    );

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let state = AppState {
        sessions: Arc::new(sessions),
        geocoder,
        config: Arc::new(config),
    };
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{addr}");

    let server = async {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    };

    // SSE streams never finish on their own, so draining is bounded
    tokio::select! {
        result = server => result?,
        () = drain_deadline(shutdown_timeout) => {
            warn!(?shutdown_timeout, "Connections still open after shutdown timeout");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves `timeout` after the shutdown signal, never before
async fn drain_deadline(timeout: Duration) {
    shutdown_signal().await;
    tokio::time::sleep(timeout).await;
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
