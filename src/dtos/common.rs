//! Small response bodies and field parsers shared by several DTOs

use serde::Serialize;
use serde_json::Value;

/// `{ "message": "..." }` confirmation body
#[derive(Serialize, Debug)]
pub struct MessageDTO {
    pub message: &'static str,
}

impl MessageDTO {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

// Parsers for body fields kept as raw `Value`: scalars may arrive as strings,
// and an unusable value is reported as a field error.

/// Whole number, given as a JSON number or a numeric string
pub fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Finite number, given as a JSON number or a numeric string
pub fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// `true`/`false`, also accepted as `"true"`, `"false"`, `"1"` and `"0"`
pub fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}
