//! geotext-cp library - Coordinate Parser service
//!
//! Extracts latitude/longitude pairs from free-form Latin/Cyrillic text,
//! normalizes them to signed decimal degrees and classifies the point set
//! as none / point / line / polygon.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod extractor;
pub mod input;
pub mod service;

pub use crate::error::{ApiError, ApiResult};
pub use crate::extractor::{Coordinate, CoordinateExtractor};
pub use crate::service::{CoordinateService, GeometryType, ParseResult};

/// Extra request body allowance over the text limit for JSON framing and escapes
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Stateless parser, shared by copy
    pub service: CoordinateService,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Largest accepted `text` field, in bytes
    pub max_text_bytes: usize,
}

impl AppState {
    /// Create new application state
    pub fn new(max_text_bytes: usize) -> Self {
        Self {
            service: CoordinateService::new(),
            startup_time: Utc::now(),
            max_text_bytes,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .max_text_bytes
        .saturating_mul(2)
        .saturating_add(BODY_OVERHEAD_BYTES);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::info_routes())
        .merge(api::health_routes())
        .merge(api::coordinate_routes())
        .fallback(api::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
