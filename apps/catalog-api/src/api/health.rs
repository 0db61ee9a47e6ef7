//! Readiness endpoint
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

/// Router with `GET /ready`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - pings PostgreSQL, 503 when it does not answer
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
