//! Field access over loosely-typed JSON payloads.
//!
//! Request bodies and event details arrive as arbitrary JSON. Handlers read
//! them with the lenient rules below: a field counts as "provided" only when
//! it is truthy, and optional fields fall back to a default only when absent
//! (an explicit `null` is kept).

use serde_json::{Map, Value};

/// JSON object type used for payload fields.
pub type Fields = Map<String, Value>;

/// Returns `false` for `null`, `false`, zero, and empty strings, arrays
/// and objects.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Returns the field when it is present and truthy.
#[must_use]
pub fn required<'a>(fields: &'a Fields, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| is_truthy(v))
}

/// Returns the field if present (even when `null`), otherwise `default`.
#[must_use]
pub fn optional(fields: &Fields, key: &str, default: Value) -> Value {
    fields.get(key).cloned().unwrap_or(default)
}

/// Renders a value for use inside names and messages.
///
/// Strings render bare; everything else renders as compact JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
