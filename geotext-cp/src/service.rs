//! Coordinate service: extraction plus geometry classification
//!
//! Classification is a planar heuristic on decimal degrees, not a geodesic test:
//! - 0 points → `none`, 1 → `point`, 2 → `line`
//! - ≥3 points whose first and last differ by < 0.001° on both axes → `polygon`
//! - ≥3 points with every consecutive step ≤ 1.0° (Euclidean) → `polygon`
//! - otherwise → `line`

use serde::Serialize;
use tracing::debug;

use crate::extractor::{Coordinate, CoordinateExtractor};

/// Per-axis tolerance for treating first and last point as the same (~100 m)
pub const CLOSURE_TOLERANCE_DEG: f64 = 0.001;

/// Largest consecutive step still treated as part of a connected ring
pub const MAX_RING_STEP_DEG: f64 = 1.0;

/// Shape formed by the ordered coordinate sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    None,
    Point,
    Line,
    Polygon,
}

impl GeometryType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::None => "none",
            GeometryType::Point => "point",
            GeometryType::Line => "line",
            GeometryType::Polygon => "polygon",
        }
    }
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub total_coordinates: usize,
    pub geometry_type: GeometryType,
    pub coordinates: Vec<Coordinate>,
}

/// Classify an ordered point sequence
pub fn determine_geometry_type(coordinates: &[Coordinate]) -> GeometryType {
    match coordinates.len() {
        0 => return GeometryType::None,
        1 => return GeometryType::Point,
        2 => return GeometryType::Line,
        _ => {}
    }

    let first = &coordinates[0];
    let last = &coordinates[coordinates.len() - 1];
    if (first.latitude - last.latitude).abs() < CLOSURE_TOLERANCE_DEG
        && (first.longitude - last.longitude).abs() < CLOSURE_TOLERANCE_DEG
    {
        return GeometryType::Polygon;
    }

    let connected = coordinates.windows(2).all(|pair| {
        let dlat = pair[0].latitude - pair[1].latitude;
        let dlon = pair[0].longitude - pair[1].longitude;
        dlat.hypot(dlon) <= MAX_RING_STEP_DEG
    });

    if connected {
        GeometryType::Polygon
    } else {
        GeometryType::Line
    }
}

/// Stateless front door to extraction and classification
///
/// Cheap to clone and safe to share across threads; the only state is the
/// process-wide pattern table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateService {
    extractor: CoordinateExtractor,
}

impl CoordinateService {
    pub fn new() -> Self {
        Self {
            extractor: CoordinateExtractor::new(),
        }
    }

    /// Extract coordinates from `text` and classify their shape
    pub fn process(&self, text: &str) -> ParseResult {
        let coordinates = self.extractor.extract(text);
        let geometry_type = determine_geometry_type(&coordinates);

        debug!(
            total = coordinates.len(),
            geometry = %geometry_type,
            "Processed text ({} chars)",
            text.chars().count()
        );

        ParseResult {
            total_coordinates: coordinates.len(),
            geometry_type,
            coordinates,
        }
    }
}
