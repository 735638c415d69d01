use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
///
/// Reports the server status and how many users are held in memory.
/// Used by load balancers and monitoring systems.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let users = state.store.read().await.len();

    Json(json!({
        "status": "healthy",
        "users": users,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
