//! Axum-based HTTP API exposing the dashboard view model

use crate::chains::{ATTRIBUTION, POS_CHAINS};
use crate::controller::{DashboardView, EnergyMetricsController};
use crate::error::{EnergyError, Result};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<EnergyMetricsController>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn version() -> impl IntoResponse {
    Json(serde_json::json!({ "version": env!("APP_VERSION") }))
}

/// Current view model; served even while loading or after a failed refresh
pub async fn metrics(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.controller.view_model())
}

pub async fn chains() -> impl IntoResponse {
    Json(serde_json::json!({
        "chains": POS_CHAINS,
        "attribution": ATTRIBUTION,
    }))
}

/// Server-sent events: the current view first, then one event per published state
pub async fn metrics_stream(State(state): State<AppState>) -> impl IntoResponse {
    let floor = state.controller.min_ethereum_percentage();
    let rx = state.controller.subscribe();
    let stream = WatchStream::new(rx).filter_map(move |snapshot| {
        let view = DashboardView::from_state(&snapshot, floor);
        Event::default()
            .event("metrics")
            .json_data(&view)
            .ok()
            .map(Ok::<Event, std::convert::Infallible>)
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/version", get(version))
        .route("/api/metrics", get(metrics))
        .route("/api/metrics/stream", get(metrics_stream))
        .route("/api/chains", get(chains))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Resolve the bind address, falling back to loopback on an unparsable host
pub fn bind_addr(host: &str, port: u16) -> SocketAddr {
    match host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, port),
        Err(_) => {
            crate::logging::get_logger("web")
                .warn(&format!("Invalid host '{}'; falling back to 127.0.0.1", host));
            ([127, 0, 0, 1], port).into()
        }
    }
}

/// Bind and serve until `shutdown` resolves
pub async fn serve<F>(
    controller: Arc<EnergyMetricsController>,
    host: &str,
    port: u16,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = bind_addr(host, port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| EnergyError::web(format!("Failed to bind {}: {}", addr, e)))?;
    serve_with_listener(listener, controller, shutdown).await
}

pub async fn serve_with_listener<F>(
    listener: TcpListener,
    controller: Arc<EnergyMetricsController>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let logger = crate::logging::get_logger("web");
    let local_addr = listener.local_addr()?;
    logger.info(&format!(
        "Web server listening at http://{}:{} (API /api)",
        local_addr.ip(),
        local_addr.port()
    ));

    let router = build_router(AppState { controller });
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| EnergyError::web(e.to_string()))?;

    logger.info("Web server stopped");
    Ok(())
}
