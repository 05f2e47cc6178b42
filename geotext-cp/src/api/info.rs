//! Service information endpoint
//!
//! Reports version and build metadata captured by build.rs.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::method_not_allowed;
use crate::AppState;

/// Endpoints advertised to clients
pub const ENDPOINTS: &[&str] = &["/coordinates", "/health", "/info"];

/// Service information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub service: String,
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
    pub endpoints: Vec<String>,
}

/// GET / and GET /info
pub async fn service_info() -> Json<InfoResponse> {
    Json(InfoResponse {
        service: "Coordinate Parser".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

/// Build info routes
pub fn info_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info).fallback(method_not_allowed))
        .route("/info", get(service_info).fallback(method_not_allowed))
}
