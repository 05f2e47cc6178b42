//! Coordinate notation registry
//!
//! One [`PatternRule`] per supported notation, in priority order (index 0 is
//! applied first). The table is compiled once per process and never mutated,
//! so any number of threads can scan with it concurrently.

use once_cell::sync::Lazy;
use regex::Regex;

/// Textual notation a pattern recognizes
///
/// Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoordinateFormat {
    /// `55.7558 37.6173`
    DecimalPair,
    /// `N55.75 E37.61`
    HemispherePrefixed,
    /// `55-45.3N 37-37.0E`
    DegreeHyphenMinute,
    /// `5545N 03737E`
    CompactDegreeMinute,
    /// `55°45'N 37°37'E` or `55°45'N, 37°37'E`, hemisphere letters optional
    DegreeMinuteLatin,
    /// `55°45' с.ш. 37°37' в.д.`
    DegreeMinuteCyrillic,
    /// `40°26'46'N 79°58'56'W`
    DegreeMinuteSecond,
    /// `55,7558; 37,6173°`
    SeparatedDecimal,
}

impl CoordinateFormat {
    /// All formats in priority order
    pub fn all_variants() -> &'static [CoordinateFormat] {
        &[
            CoordinateFormat::DecimalPair,
            CoordinateFormat::HemispherePrefixed,
            CoordinateFormat::DegreeHyphenMinute,
            CoordinateFormat::CompactDegreeMinute,
            CoordinateFormat::DegreeMinuteLatin,
            CoordinateFormat::DegreeMinuteCyrillic,
            CoordinateFormat::DegreeMinuteSecond,
            CoordinateFormat::SeparatedDecimal,
        ]
    }

    /// Regular expression source for this notation
    fn pattern(&self) -> &'static str {
        match self {
            CoordinateFormat::DecimalPair => r"(-?\d{1,3}\.\d+)\s+(-?\d{1,3}\.\d+)",
            CoordinateFormat::HemispherePrefixed => {
                r"(?i)([NS])(\d{1,3}\.\d+)\s+([WE])(\d{1,3}\.\d+)"
            }
            CoordinateFormat::DegreeHyphenMinute => {
                r"(?i)(\d{1,3})-(\d{1,2}(?:\.\d+)?)([NS])\s+(\d{1,3})-(\d{1,2}(?:\.\d+)?)([WE])"
            }
            CoordinateFormat::CompactDegreeMinute => {
                r"(?i)(\d{2})(\d{2})([NS])\s+(\d{2,3})(\d{2})([WE])"
            }
            CoordinateFormat::DegreeMinuteLatin => concat!(
                r"(?i)(\d{1,3})[°\s]*(\d{1,2}(?:\.\d+)?)?['′\s]*([NS]?)[,;]?\s*",
                r"(\d{1,3})[°\s]*(\d{1,2}(?:\.\d+)?)?['′\s]*([WE]?)",
            ),
            CoordinateFormat::DegreeMinuteCyrillic => concat!(
                r"(?i)(\d{1,3})[°\s]*(\d{1,2}(?:\.\d+)?)?['′\s]*(с\.ш|ю\.ш|С|Ю)\.?[,;]?\s*",
                r"(\d{1,3})[°\s]*(\d{1,2}(?:\.\d+)?)?['′\s]*(в\.д|з\.д|В|З)\.?",
            ),
            CoordinateFormat::DegreeMinuteSecond => concat!(
                r#"(?i)(\d{1,3})[°\s]*(\d{1,2})['′\s]*(\d{1,2}(?:\.\d+)?)?['′"″\s]*([NS])[,;]?\s*"#,
                r#"(\d{1,3})[°\s]*(\d{1,2})['′\s]*(\d{1,2}(?:\.\d+)?)?['′"″\s]*([WE])"#,
            ),
            CoordinateFormat::SeparatedDecimal => {
                r"(-?\d{1,3}[,.]\d+)[°\s]*[,;\s]+(-?\d{1,3}[,.]\d+)°?"
            }
        }
    }

    /// Short identifier used in logs
    pub fn name(&self) -> &'static str {
        match self {
            CoordinateFormat::DecimalPair => "decimal_pair",
            CoordinateFormat::HemispherePrefixed => "hemisphere_prefixed",
            CoordinateFormat::DegreeHyphenMinute => "degree_hyphen_minute",
            CoordinateFormat::CompactDegreeMinute => "compact_degree_minute",
            CoordinateFormat::DegreeMinuteLatin => "degree_minute_latin",
            CoordinateFormat::DegreeMinuteCyrillic => "degree_minute_cyrillic",
            CoordinateFormat::DegreeMinuteSecond => "degree_minute_second",
            CoordinateFormat::SeparatedDecimal => "separated_decimal",
        }
    }
}

/// A registered notation: its format tag, priority and compiled matcher
#[derive(Debug)]
pub struct PatternRule {
    pub format: CoordinateFormat,
    /// 0 = highest priority
    pub priority: usize,
    pub regex: Regex,
}

/// Process-wide pattern table, built on first use
pub static PATTERN_TABLE: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    CoordinateFormat::all_variants()
        .iter()
        .enumerate()
        .map(|(priority, &format)| PatternRule {
            format,
            priority,
            regex: Regex::new(format.pattern()).expect("coordinate pattern should compile"),
        })
        .collect()
});
