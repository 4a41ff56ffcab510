//! Reading plan documents from disk.
//!
//! Every failure here is `InvalidInput`: the plan could not even be looked at.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::error::Violation;

/// Parse JSON text into an untyped tree. Shape is checked later.
pub fn parse_plan(text: &str) -> Result<Value, Violation> {
    serde_json::from_str(text).map_err(|e| Violation::invalid_input(format!("Invalid JSON: {}", e)))
}

/// Read and parse a UTF-8 JSON plan file.
pub fn load_plan(path: &Path) -> Result<Value, Violation> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            Violation::invalid_input(format!("Plan file not found: {}", path.display()))
        }
        _ => Violation::invalid_input(format!("Cannot read plan: {}", e)),
    })?;

    tracing::debug!(path = %path.display(), bytes = raw.len(), "plan file read");
    parse_plan(&raw)
}
