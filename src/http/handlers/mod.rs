//! Route handlers.

pub mod auth;
pub mod tasks;

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe.
#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
