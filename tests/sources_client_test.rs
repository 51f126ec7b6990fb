use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use pos_energy::EnergyMetricsController;
use pos_energy::config::{Config, SourcesConfig};
use pos_energy::error::{EnergyError, FETCH_FAILED_MESSAGE};
use pos_energy::sources::{CcafClient, StatsSource};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::TcpListener;

const BTC_PATH: &str = "/cbeci/api/btc";
const ETH_PATH: &str = "/cbeci/api/eth/pos/data/stats";

#[derive(Clone, Default)]
struct FeedState {
    ethereum_down: Arc<AtomicBool>,
}

async fn bitcoin_feed() -> impl IntoResponse {
    Json(json!({
        "data": { "estimated": 150.0, "lower_bound": 80.0, "upper_bound": 390.0 },
        "timestamp": 1_700_000_000
    }))
}

async fn ethereum_feed(
    axum::extract::State(state): axum::extract::State<FeedState>,
) -> axum::response::Response {
    if state.ethereum_down.load(Ordering::SeqCst) {
        return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
    }
    Json(json!({
        "data": { "guess_power": 2900.0, "min_power": 2000.0, "max_power": 4500.0 }
    }))
    .into_response()
}

async fn malformed_feed() -> impl IntoResponse {
    ([("content-type", "application/json")], "{\"data\": [1, 2")
}

/// Serve fake feeds on an ephemeral port and return its base URL
async fn spawn_feeds(state: FeedState) -> String {
    let router = Router::new()
        .route(BTC_PATH, get(bitcoin_feed))
        .route(ETH_PATH, get(ethereum_feed))
        .route("/malformed", get(malformed_feed))
        .with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn sources(base: &str) -> SourcesConfig {
    SourcesConfig {
        bitcoin_url: format!("{}{}", base, BTC_PATH),
        ethereum_url: format!("{}{}", base, ETH_PATH),
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn fetches_both_feeds() {
    let base = spawn_feeds(FeedState::default()).await;
    let client = CcafClient::new(&sources(&base)).unwrap();

    let btc = client.fetch_bitcoin().await.unwrap();
    assert_eq!(btc.estimated, 150.0);
    assert_eq!(btc.upper_bound, 390.0);

    let eth = client.fetch_ethereum().await.unwrap();
    assert_eq!(eth.guess_power, 2900.0);
    assert_eq!(eth.min_power, 2000.0);
}

#[tokio::test]
async fn non_success_status_is_fetch_failure() {
    let state = FeedState::default();
    state.ethereum_down.store(true, Ordering::SeqCst);
    let base = spawn_feeds(state).await;
    let client = CcafClient::new(&sources(&base)).unwrap();

    let err = client.fetch_ethereum().await.unwrap_err();
    assert!(matches!(err, EnergyError::FetchFailed { .. }));
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn malformed_body_is_fetch_failure() {
    let base = spawn_feeds(FeedState::default()).await;
    let mut cfg = sources(&base);
    cfg.bitcoin_url = format!("{}/malformed", base);
    let client = CcafClient::new(&cfg).unwrap();

    assert!(client.fetch_bitcoin().await.unwrap_err().is_fetch_failure());
}

#[tokio::test]
async fn unreachable_host_is_fetch_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CcafClient::new(&sources(&format!("http://{}", addr))).unwrap();
    assert!(client.fetch_bitcoin().await.unwrap_err().is_fetch_failure());
}

#[tokio::test]
async fn controller_keeps_data_when_a_feed_goes_down() {
    let state = FeedState::default();
    let base = spawn_feeds(state.clone()).await;
    let mut config = Config::default();
    config.sources = sources(&base);

    let controller = EnergyMetricsController::from_config(&config).unwrap();
    controller.refresh().await.unwrap();
    let view = controller.view_model();
    assert!(view.error.is_none());
    assert_eq!(view.metrics.bitcoin_power_gw, 150.0);
    assert_eq!(view.metrics.adjusted_bitcoin_percentage, 98.0);

    state.ethereum_down.store(true, Ordering::SeqCst);
    assert!(controller.refresh().await.is_err());

    let view = controller.view_model();
    assert!(!view.loading);
    assert_eq!(view.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(view.metrics.bitcoin_power_gw, 150.0);
    assert_eq!(view.failure_count, 1);

    state.ethereum_down.store(false, Ordering::SeqCst);
    controller.refresh().await.unwrap();
    assert!(controller.state().error.is_none());
}
