//! Leaf type predicates over the JSON value view.

use serde_json::Value;

use crate::draw::color::is_hex_color;
use crate::draw::layout::Align;

/// Non-negative integer. Integral floats (`10.0`) count; strings never do.
pub fn is_nat(value: &Value) -> bool {
    as_nat(value).is_some()
}

pub fn as_nat(value: &Value) -> Option<u64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_u64() {
        return Some(n);
    }
    let float = number.as_f64()?;
    (float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64)
        .then_some(float as u64)
}

/// Non-empty string.
pub fn is_str(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.is_empty())
}

pub fn is_color(value: &Value) -> bool {
    value.as_str().is_some_and(is_hex_color)
}

/// Finite number not exceeding `limit`. There is no lower bound: elements
/// may hang off the left or top edge.
pub fn is_position(value: &Value, limit: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|pos| pos.is_finite() && pos <= limit)
}

pub fn is_align(value: &Value) -> bool {
    value.as_str().and_then(Align::parse).is_some()
}

/// One of the element type names: `shape`, `image` or `text`.
pub fn is_element_kind(value: &Value) -> bool {
    matches!(value.as_str(), Some("shape" | "image" | "text"))
}
