//! # forecast-server
//!
//! REST endpoint that trains a fresh LSTM for every request and answers with
//! a short-horizon forecast of the posted series.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use forecaster_facade::{Forecaster, LstmForecaster};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod routes;

/// Application state shared across handlers
///
/// Holds only the immutable forecaster configuration; every request builds
/// and discards its own model.
#[derive(Clone, Default)]
pub struct AppState {
    forecaster: Arc<LstmForecaster>,
}

impl AppState {
    pub fn new(forecaster: LstmForecaster) -> Self {
        Self {
            forecaster: Arc::new(forecaster),
        }
    }

    pub fn forecaster(&self) -> &Arc<LstmForecaster> {
        &self.forecaster
    }
}

/// Liveness probe - is the server running?
async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - reports the forecasting setup without training anything
async fn readiness(State(state): State<AppState>) -> Json<serde_json::Value> {
    let forecaster = state.forecaster();
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "window_size": forecaster.window_size(),
        "horizon": forecaster.horizon(),
        "config": forecaster.config(),
    }))
}

/// Builds the router with CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints (Kubernetes-compatible)
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/health", get(liveness))
        // Forecast endpoint, plus the path the dashboard gateway forwards
        .route("/predict", post(routes::predict))
        .route("/api/predict", post(routes::predict))
        // Middleware layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
