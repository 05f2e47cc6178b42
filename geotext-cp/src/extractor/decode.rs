//! Per-format decoding of pattern captures into signed decimal degrees
//!
//! Each [`CoordinateFormat`] has its own decode branch. A branch returns `None`
//! when its captures are ambiguous, in which case [`decode_fallback`] reads the
//! first two numbers out of the matched text instead.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::patterns::CoordinateFormat;

/// Numeric tokens considered by the fallback decoder
static NUMBER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d{1,3}(?:[.,]\d+)?").expect("number regex should compile"));

/// Fallback reads at most this many numbers from a match
const MAX_FALLBACK_NUMBERS: usize = 4;

/// How a candidate's value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMethod {
    /// Decoded from the pattern's own captures
    Dedicated,
    /// Decoded by the generic first-two-numbers rule
    Fallback,
}

/// Signed latitude/longitude decoded from one match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    pub lat: f64,
    pub lon: f64,
    pub method: DecodeMethod,
}

/// True when a hemisphere indicator denotes the southern or western half
///
/// Accepts `S`/`W` letters (any case) and Cyrillic labels containing `ю` or `з`
/// (`Ю`, `ю.ш`, `З`, `з.д`).
pub fn is_negative_hemisphere(hemisphere: &str) -> bool {
    let upper = hemisphere.trim().to_uppercase();
    upper == "S" || upper == "W" || upper.contains('Ю') || upper.contains('З')
}

/// Convert degrees/minutes/seconds plus hemisphere into signed decimal degrees
///
/// `decimal = degrees + minutes/60 + seconds/3600`, negated for S/W/Ю/З.
pub fn convert_to_decimal(degrees: f64, minutes: f64, seconds: f64, hemisphere: &str) -> f64 {
    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    if is_negative_hemisphere(hemisphere) {
        -decimal
    } else {
        decimal
    }
}

/// Decode a match of `format`, falling back to the generic rule when the
/// dedicated branch declines
pub fn decode(format: CoordinateFormat, caps: &Captures) -> Option<Decoded> {
    if let Some((lat, lon)) = decode_dedicated(format, caps) {
        return Some(Decoded {
            lat,
            lon,
            method: DecodeMethod::Dedicated,
        });
    }

    let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    decode_fallback(matched).map(|(lat, lon)| Decoded {
        lat,
        lon,
        method: DecodeMethod::Fallback,
    })
}

fn decode_dedicated(format: CoordinateFormat, caps: &Captures) -> Option<(f64, f64)> {
    match format {
        CoordinateFormat::DecimalPair => Some((number(caps, 1)?, number(caps, 2)?)),
        CoordinateFormat::HemispherePrefixed => Some((
            convert_to_decimal(number(caps, 2)?, 0.0, 0.0, text(caps, 1)),
            convert_to_decimal(number(caps, 4)?, 0.0, 0.0, text(caps, 3)),
        )),
        CoordinateFormat::DegreeHyphenMinute
        | CoordinateFormat::CompactDegreeMinute
        | CoordinateFormat::DegreeMinuteCyrillic => Some((
            convert_to_decimal(number(caps, 1)?, optional(caps, 2)?, 0.0, text(caps, 3)),
            convert_to_decimal(number(caps, 4)?, optional(caps, 5)?, 0.0, text(caps, 6)),
        )),
        CoordinateFormat::DegreeMinuteLatin => {
            // Without both hemisphere letters the digit grouping is a guess
            if text(caps, 3).is_empty() || text(caps, 6).is_empty() {
                return None;
            }
            Some((
                convert_to_decimal(number(caps, 1)?, optional(caps, 2)?, 0.0, text(caps, 3)),
                convert_to_decimal(number(caps, 4)?, optional(caps, 5)?, 0.0, text(caps, 6)),
            ))
        }
        CoordinateFormat::DegreeMinuteSecond => Some((
            convert_to_decimal(
                number(caps, 1)?,
                number(caps, 2)?,
                optional(caps, 3)?,
                text(caps, 4),
            ),
            convert_to_decimal(
                number(caps, 5)?,
                number(caps, 6)?,
                optional(caps, 7)?,
                text(caps, 8),
            ),
        )),
        CoordinateFormat::SeparatedDecimal => Some((number(caps, 1)?, number(caps, 2)?)),
    }
}

/// Generic decode: first two of up to four numbers, signs from letters
///
/// Latitude is negated when the match contains `S` or `Ю`, longitude when it
/// contains `W` or `З` (case-insensitive, anywhere in the text). Additional
/// numbers are ignored, so `40°26'46` reads as (40, 26).
pub fn decode_fallback(matched: &str) -> Option<(f64, f64)> {
    let numbers: Vec<f64> = NUMBER_TOKEN
        .find_iter(matched)
        .take(MAX_FALLBACK_NUMBERS)
        .filter_map(|m| parse_number(m.as_str()))
        .collect();

    if numbers.len() < 2 {
        return None;
    }

    let (mut lat, mut lon) = (numbers[0], numbers[1]);
    let upper = matched.to_uppercase();
    if upper.contains('S') || upper.contains('Ю') {
        lat = -lat.abs();
    }
    if upper.contains('W') || upper.contains('З') {
        lon = -lon.abs();
    }

    Some((lat, lon))
}

/// Parse a numeric token, reading `,` as the decimal point
fn parse_number(token: &str) -> Option<f64> {
    token.replace(',', ".").parse::<f64>().ok()
}

fn text<'t>(caps: &Captures<'t>, group: usize) -> &'t str {
    caps.get(group).map(|m| m.as_str()).unwrap_or_default()
}

/// Required numeric capture
fn number(caps: &Captures, group: usize) -> Option<f64> {
    caps.get(group).and_then(|m| parse_number(m.as_str()))
}

/// Optional numeric capture; absent means zero, unparsable declines
fn optional(caps: &Captures, group: usize) -> Option<f64> {
    match caps.get(group) {
        Some(m) if !m.as_str().is_empty() => parse_number(m.as_str()),
        _ => Some(0.0),
    }
}
