//! Readiness endpoint. Liveness (`/health`) comes from `axum_helpers::health_router`.

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health;
use mongodb::Client;

use crate::state::AppState;

async fn ready(State(client): State<Client>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> =
        vec![("mongodb", Box::pin(async { check_health(&client).await }))];

    match run_health_checks(checks).await {
        Ok(ok) => ok,
        Err(unavailable) => unavailable,
    }
}

/// Router exposing `GET /ready`
pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state.mongo_client.clone())
}
