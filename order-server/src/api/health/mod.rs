//! Health check route

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    /// ok | error | disconnected
    database: &'static str,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = if !state.db_ready() {
        "disconnected"
    } else {
        match state.db.query("RETURN 1").await {
            Ok(_) => "ok",
            Err(_) => "error",
        }
    };

    Json(HealthResponse {
        status: if database == "ok" { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
