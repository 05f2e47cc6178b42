//! Context window and label extraction around a match
//!
//! Offsets here are character offsets, not byte offsets.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters taken on each side of a match before sentence trimming
pub const CONTEXT_RADIUS: usize = 100;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:точка|point|цель|target|угол|corner)\s+([A-Za-zА-Яа-я0-9]+)")
        .expect("name regex should compile")
});

/// Sentence terminator followed by whitespace at `chars[i]`
fn is_sentence_end(chars: &[char], i: usize) -> bool {
    matches!(chars[i], '.' | '!' | '?')
        && chars.get(i + 1).map(|c| c.is_whitespace()).unwrap_or(false)
}

/// Sentence-bounded text around `chars[start..end]`
///
/// Takes ±[`CONTEXT_RADIUS`] characters, then cuts after the first sentence end
/// at or after the match start and after the last sentence end before it.
pub fn extract_context(chars: &[char], start: usize, end: usize) -> String {
    let window_start = start.saturating_sub(CONTEXT_RADIUS);
    let mut window_end = (end + CONTEXT_RADIUS).min(chars.len());
    let anchor = start - window_start;

    let window = &chars[window_start..window_end];
    if let Some(i) = (anchor..window.len().saturating_sub(1)).find(|&i| is_sentence_end(window, i)) {
        window_end = window_start + i + 1;
    }

    let window = &chars[window_start..window_end];
    let last_before = (0..=anchor.min(window.len().saturating_sub(1)))
        .rev()
        .find(|&i| i + 1 < window.len() && is_sentence_end(window, i));
    let context_start = match last_before {
        Some(i) => window_start + i + 1,
        None => window_start,
    };

    chars[context_start..window_end]
        .iter()
        .collect::<String>()
        .trim()
        .to_string()
}

/// Label following a keyword such as `point` or `точка`, or empty
pub fn extract_name(context: &str) -> String {
    NAME_PATTERN
        .captures(context)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
