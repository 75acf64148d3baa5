//! HTTP handlers.

pub mod auth;
pub mod sessions;

use axum::{Json, extract::FromRequest};
use serde_json::{Value, json};

use crate::error::ApiError;

/// JSON body extractor whose rejection uses the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
