//! Shape-checked field access over a parsed JSON tree.
//!
//! Each helper either returns the typed value or an `InvalidInput`
//! violation that names the offending location.

use serde_json::{Map, Value};

use crate::error::Violation;

pub(super) type Object = Map<String, Value>;

pub(super) fn document_object(doc: &Value) -> Result<&Object, Violation> {
    doc.as_object()
        .ok_or_else(|| Violation::invalid_input("Top-level JSON must be an object"))
}

pub(super) fn operations_array(plan: &Object) -> Result<&[Value], Violation> {
    match plan.get("operations").and_then(Value::as_array) {
        Some(ops) if !ops.is_empty() => Ok(ops.as_slice()),
        _ => Err(Violation::invalid_input(
            "Missing or empty 'operations' array",
        )),
    }
}

pub(super) fn operation_object(item: &Value, index: usize) -> Result<&Object, Violation> {
    item.as_object().ok_or_else(|| {
        Violation::invalid_input(format!("operations[{}] must be an object", index))
    })
}

pub(super) fn string_field<'a>(
    op: &'a Object,
    index: usize,
    field: &str,
) -> Result<&'a str, Violation> {
    op.get(field).and_then(Value::as_str).ok_or_else(|| {
        Violation::invalid_input(format!("operations[{}].{} must be a string", index, field))
    })
}

pub(super) fn non_empty_string_field<'a>(
    op: &'a Object,
    index: usize,
    field: &str,
) -> Result<&'a str, Violation> {
    match op.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(Violation::invalid_input(format!(
            "operations[{}].{} must be a non-empty string",
            index, field
        ))),
    }
}

/// `task` may be absent or null; anything else must be non-blank text.
pub(super) fn optional_task(plan: &Object) -> Result<Option<&str>, Violation> {
    match plan.get("task") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.as_str())),
        Some(_) => Err(Violation::invalid_input(
            "'task' must be a non-empty string if present",
        )),
    }
}

/// Render a raw field for an error message: strings as-is, anything else as JSON.
pub(super) fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}
