//! Lenient field access over provider JSON.
//!
//! The betline API does not guarantee every field on every node, and some
//! numeric fields arrive as strings. Every accessor here degrades to a zero
//! value (`""`, `0`, `0.0`, `false`) instead of failing.

use serde_json::Value;

/// Text value of `key`. Numbers and booleans are stringified, anything else is empty.
pub fn field_str(node: &Value, key: &str) -> String {
    match node.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Integer value of `key`, accepting numeric strings and truncating floats.
pub fn field_i64(node: &Value, key: &str) -> i64 {
    match node.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| v as i64))
            .or_else(|| n.as_f64().map(|v| v as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

/// Floating point value of `key`, accepting numeric strings.
pub fn field_f64(node: &Value, key: &str) -> f64 {
    match node.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Boolean value of `key`. `"true"` strings and non-zero integers count as true.
pub fn field_bool(node: &Value, key: &str) -> bool {
    match node.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_i64().map(|v| v != 0).unwrap_or(false),
        _ => false,
    }
}

/// Elements of the array at `key`, or an empty slice for anything else.
pub fn field_array<'a>(node: &'a Value, key: &str) -> &'a [Value] {
    node.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
