//! Coordinate parsing endpoint
//!
//! POST /coordinates with `{"text": "..."}` returns the parse result.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use super::method_not_allowed;
use crate::error::{ApiError, ApiResult};
use crate::service::ParseResult;
use crate::AppState;

/// Pull the non-empty `text` field out of a raw request body
///
/// Checks run in order: empty body, JSON object, `text` string, non-empty text.
pub fn read_text_field(body: &[u8]) -> ApiResult<String> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ApiError::BadRequest("Empty request body".to_string()));
    }

    let document: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON in request body".to_string()))?;
    let Value::Object(mut request) = document else {
        return Err(ApiError::BadRequest("Invalid JSON in request body".to_string()));
    };

    let text = match request.remove("text") {
        Some(Value::String(text)) => text,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing or invalid 'text' field in request".to_string(),
            ))
        }
    };

    if text.is_empty() {
        return Err(ApiError::BadRequest("Text cannot be empty".to_string()));
    }

    Ok(text)
}

/// Map a failed body read onto the JSON error contract
fn body_rejection(rejection: BytesRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(format!("Failed to read request body: {}", rejection.body_text()))
    }
}

/// POST /coordinates
pub async fn parse_coordinates(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<ParseResult>> {
    let body = body.map_err(body_rejection)?;
    let text = read_text_field(&body)?;
    if text.len() > state.max_text_bytes {
        return Err(ApiError::PayloadTooLarge);
    }

    let service = state.service;
    let text_chars = text.chars().count();
    let result = tokio::task::spawn_blocking(move || service.process(&text))
        .await
        .map_err(|e| ApiError::Internal(format!("Extraction task failed: {}", e)))?;

    info!(
        chars = text_chars,
        total = result.total_coordinates,
        geometry = %result.geometry_type,
        "Parsed coordinates"
    );

    Ok(Json(result))
}

/// Build coordinate routes
pub fn coordinate_routes() -> Router<AppState> {
    Router::new().route(
        "/coordinates",
        post(parse_coordinates).fallback(method_not_allowed),
    )
}
