//! Argument checks run before any request is built.

use serde_json::Value;

use crate::GrafanaError;
use crate::url_encoding::encode_path_segment;

pub fn non_empty(name: &str, value: &str) -> Result<(), GrafanaError> {
    if value.is_empty() {
        return Err(GrafanaError::invalid(format!("{name} must not be empty")));
    }
    Ok(())
}

pub fn non_zero(name: &str, value: i64) -> Result<(), GrafanaError> {
    if value == 0 {
        return Err(GrafanaError::invalid(format!("{name} must not be 0")));
    }
    Ok(())
}

/// A JSON document argument must be an object with at least one key.
pub fn non_empty_object(name: &str, value: &Value) -> Result<(), GrafanaError> {
    match value.as_object() {
        Some(object) if !object.is_empty() => Ok(()),
        Some(_) => Err(GrafanaError::invalid(format!("{name} must not be empty"))),
        None => Err(GrafanaError::invalid(format!("{name} must be a JSON object"))),
    }
}

/// Check a value destined for one path segment and return it encoded.
///
/// `.` and `..` are refused outright: URL parsing resolves them as dot
/// segments even though they contain nothing to encode.
pub fn path_segment(name: &str, value: &str) -> Result<String, GrafanaError> {
    non_empty(name, value)?;
    if value == "." || value == ".." {
        return Err(GrafanaError::invalid(format!(
            "{name} must not be '.' or '..'"
        )));
    }
    Ok(encode_path_segment(value))
}
