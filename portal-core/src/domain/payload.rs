//! Payload accessors
//!
//! A portal payload is free-form JSON. These helpers read the well-known
//! display fields with the same fallbacks the frontend uses.

use serde_json::Value;

pub const CELEBRATION_TYPE: &str = "celebrationType";
pub const RECIPIENT_NAME: &str = "recipientName";
pub const SENDER_NAME: &str = "senderName";
pub const TEMPLATE: &str = "template";
pub const PASSCODE: &str = "passcode";

/// Value written by an old frontend build that serialized an object into the type field
pub const CORRUPTED_TYPE: &str = "[object Object]";

/// Replacement used when repairing corrupted celebration types
pub const UNKNOWN_TYPE: &str = "unknown";

pub const DEFAULT_TYPE: &str = "general";

/// Celebration type used for grouping and display
///
/// Missing, null, empty or falsy values fall back to `general`.
/// Non-string values are rendered as compact JSON.
pub fn celebration_type(payload: &Value) -> String {
    match payload.get(CELEBRATION_TYPE) {
        Some(value) if is_truthy(value) => render(value),
        _ => DEFAULT_TYPE.to_string(),
    }
}

/// Raw celebration type as stored, for debugging output
///
/// Unlike [`celebration_type`] this applies no fallback, so a missing field
/// shows up as `undefined`.
pub fn describe_celebration_type(payload: &Value) -> String {
    match payload.get(CELEBRATION_TYPE) {
        Some(value) => render(value),
        None => "undefined".to_string(),
    }
}

pub fn recipient_name(payload: &Value) -> String {
    text_or(payload, RECIPIENT_NAME, "Unknown")
}

pub fn sender_name(payload: &Value) -> String {
    text_or(payload, SENDER_NAME, "Anonymous")
}

pub fn template(payload: &Value) -> String {
    text_or(payload, TEMPLATE, "default")
}

/// True when the celebration type holds the `[object Object]` artifact
pub fn has_corrupted_type(payload: &Value) -> bool {
    payload.get(CELEBRATION_TYPE).and_then(Value::as_str) == Some(CORRUPTED_TYPE)
}

/// Copy of the payload with a corrupted celebration type replaced by `unknown`
///
/// Returns `None` when the payload does not need repairing.
pub fn repaired(payload: &Value) -> Option<Value> {
    if !has_corrupted_type(payload) {
        return None;
    }

    let mut fixed = payload.clone();
    if let Some(map) = fixed.as_object_mut() {
        map.insert(
            CELEBRATION_TYPE.to_string(),
            Value::String(UNKNOWN_TYPE.to_string()),
        );
    }
    Some(fixed)
}

fn text_or(payload: &Value, key: &str, default: &str) -> String {
    match payload.get(key) {
        Some(value) if is_truthy(value) => render(value),
        _ => default.to_string(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
