//! HTTP API handlers for geotext-cp

pub mod coordinates;
pub mod health;
pub mod info;

pub use coordinates::{coordinate_routes, parse_coordinates};
pub use health::health_routes;
pub use info::{info_routes, service_info};

use crate::error::ApiError;

/// Router fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Method fallback for known paths
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
