use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

#[tracing::instrument]
async fn health() -> Result<Json<Value>, StatusCode> {
    tracing::debug!("health check requested");

    Ok(Json(json!({
        "status": "ok",
        "service": "hotel_service"
    })))
}
