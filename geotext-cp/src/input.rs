//! One-shot parsing of a file or stdin (`--parse`)

use std::io::Read;
use std::path::Path;

use geotext_common::{Error, Result};
use tracing::info;

use crate::service::{CoordinateService, ParseResult};

/// Path argument that selects standard input
pub const STDIN_PATH: &str = "-";

/// Read all text from `input`, or from stdin when it is `-`
pub fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == STDIN_PATH {
        read_text(std::io::stdin().lock())
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

/// Drain a reader into a string; invalid UTF-8 is an I/O error
pub fn read_text<R: Read>(mut reader: R) -> Result<String> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Process `text` once, rejecting blank input
pub fn parse_text(service: &CoordinateService, text: &str) -> Result<ParseResult> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("Text cannot be empty".to_string()));
    }
    Ok(service.process(text))
}

/// Read and process `input` (a file path or `-`)
pub fn parse_input(input: &Path) -> Result<ParseResult> {
    let text = read_input(input)?;
    let result = parse_text(&CoordinateService::new(), &text)?;

    info!(
        total = result.total_coordinates,
        geometry = %result.geometry_type,
        "Parsed {}",
        input.display()
    );
    Ok(result)
}
