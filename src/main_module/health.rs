//! Liveness endpoint

use axum::Json;
use chrono::{SecondsFormat, Utc};

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "Server is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
