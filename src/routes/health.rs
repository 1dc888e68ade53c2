use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .route("/store", get(store_health))
}

pub async fn health_check(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "uptimeSecs": state.uptime_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

pub async fn store_health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let start = Instant::now();
    let healthy = state
        .store()
        .get_profile(&state.config().engine.profile_key)
        .is_ok();
    let latency_us = start.elapsed().as_micros() as u64;

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "healthy": healthy,
            "latencyUs": latency_us,
        })),
    )
}
