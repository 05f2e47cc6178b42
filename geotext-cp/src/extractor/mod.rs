//! Coordinate extraction from free-form text
//!
//! Scans text with every registered notation (see [`patterns`]), decodes each
//! hit to signed decimal degrees, resolves overlapping hits, drops out-of-range
//! values and annotates the survivors with context and an optional label.
//!
//! **Overlap resolution:** hits decoded by their own pattern beat fallback
//! decodes, longer hits beat shorter ones, then pattern priority decides.
//! Accepted hits never overlap. Output is ordered by pattern priority, then by
//! position in the text.

pub mod context;
pub mod decode;
pub mod patterns;

use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

use decode::{DecodeMethod, Decoded};
use patterns::{CoordinateFormat, PatternRule, PATTERN_TABLE};

pub use decode::{convert_to_decimal, is_negative_hemisphere};

/// Raw hit produced by one pattern
///
/// Offsets are character offsets into the scanned text.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMatch {
    pub lat: f64,
    pub lon: f64,
    pub original: String,
    pub start: usize,
    pub end: usize,
    pub format: CoordinateFormat,
    pub method: DecodeMethod,
    priority: usize,
}

impl CoordinateMatch {
    fn overlaps(&self, other: &CoordinateMatch) -> bool {
        self.start < other.end && other.start < self.end
    }

    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Validated coordinate with provenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub original_text: String,
    pub context: String,
    pub name: String,
    pub is_valid: bool,
}

/// Range check applied before a match becomes a [`Coordinate`]
pub fn validate_coordinate(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Extractor over the shared, immutable pattern table
#[derive(Debug, Clone, Copy)]
pub struct CoordinateExtractor {
    rules: &'static [PatternRule],
}

impl Default for CoordinateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateExtractor {
    /// Create an extractor, compiling the pattern table on first use
    pub fn new() -> Self {
        Self {
            rules: PATTERN_TABLE.as_slice(),
        }
    }

    /// Registered rules in priority order
    pub fn rules(&self) -> &'static [PatternRule] {
        self.rules
    }

    /// Extract all valid coordinates from `text`
    pub fn extract(&self, text: &str) -> Vec<Coordinate> {
        let chars: Vec<char> = text.chars().collect();

        self.find_matches(text)
            .into_iter()
            .filter(|m| {
                let valid = validate_coordinate(m.lat, m.lon);
                if !valid {
                    debug!(
                        format = m.format.name(),
                        lat = m.lat,
                        lon = m.lon,
                        original = %m.original,
                        "Dropping out-of-range coordinate"
                    );
                }
                valid
            })
            .map(|m| {
                let context = context::extract_context(&chars, m.start, m.end);
                let name = context::extract_name(&context);
                Coordinate {
                    latitude: m.lat,
                    longitude: m.lon,
                    original_text: m.original,
                    context,
                    name,
                    is_valid: true,
                }
            })
            .collect()
    }

    /// All non-overlapping decoded hits, before range validation
    pub fn find_matches(&self, text: &str) -> Vec<CoordinateMatch> {
        let char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let to_char = |byte: usize| char_starts.partition_point(|&b| b < byte);

        let mut candidates = Vec::new();
        for rule in self.rules {
            for caps in rule.regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                match decode::decode(rule.format, &caps) {
                    Some(Decoded { lat, lon, method }) => candidates.push(CoordinateMatch {
                        lat,
                        lon,
                        original: whole.as_str().to_string(),
                        start: to_char(whole.start()),
                        end: to_char(whole.end()),
                        format: rule.format,
                        method,
                        priority: rule.priority,
                    }),
                    None => debug!(
                        format = rule.format.name(),
                        original = whole.as_str(),
                        "No coordinate decoded from match"
                    ),
                }
            }
        }

        resolve_overlaps(candidates)
    }
}

/// Greedy selection of non-overlapping candidates by rank
fn resolve_overlaps(mut candidates: Vec<CoordinateMatch>) -> Vec<CoordinateMatch> {
    candidates.sort_by_key(|m| {
        (
            m.method == DecodeMethod::Fallback,
            Reverse(m.len()),
            m.priority,
            m.start,
        )
    });

    let mut accepted: Vec<CoordinateMatch> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if accepted.iter().any(|a| a.overlaps(&candidate)) {
            debug!(
                format = candidate.format.name(),
                original = %candidate.original,
                "Skipping match overlapped by a stronger one"
            );
            continue;
        }
        accepted.push(candidate);
    }

    accepted.sort_by_key(|m| (m.priority, m.start));
    accepted
}
