//! Floating point coercion.
//!
//! Text is parsed as a float first; when that fails it is retried as an integer literal in
//! any base, so `"0xFF"` becomes `255.0`.

use crate::types::Value;

use super::parse::{parse_float, parse_int_any_base, utf8};
use super::{Coerce, Fallback, Narrow, Numeric};

pub(crate) fn float<T: Narrow>(value: &Value) -> Result<T, Fallback> {
    if let Some(n) = Numeric::of(value) {
        return Ok(n.narrow());
    }
    match value {
        Value::Utf8(s) => parse_text(s),
        Value::Bytes(b) => utf8(b).ok_or(Fallback::Unparseable).and_then(parse_text::<T>),
        v if v.is_nil() => Err(Fallback::Absent),
        _ => Err(Fallback::Unsupported),
    }
}

fn parse_text<T: Narrow>(s: &str) -> Result<T, Fallback> {
    parse_float(s)
        .map(T::from_f64)
        .or_else(|| parse_int_any_base(s).map(T::from_i64))
        .ok_or(Fallback::Unparseable)
}

/// Coerce any value to `f32`, returning `0.0` on failure.
pub fn to_float32(value: &Value) -> f32 {
    float(value).unwrap_or(0.0)
}

/// Like [`to_float32`], but returns `default` for nil, unparseable or unsupported values.
pub fn to_float32_with_default(value: &Value, default: f32) -> f32 {
    float(value).unwrap_or(default)
}

/// Coerce any value to `f64`, returning `0.0` on failure.
pub fn to_float64(value: &Value) -> f64 {
    float(value).unwrap_or(0.0)
}

/// Like [`to_float64`], but returns `default` for nil, unparseable or unsupported values.
pub fn to_float64_with_default(value: &Value, default: f64) -> f64 {
    float(value).unwrap_or(default)
}

impl Coerce for f32 {
    const TARGET: &'static str = "float32";

    fn coerce(value: &Value) -> Result<Self, Fallback> {
        float(value)
    }
}

impl Coerce for f64 {
    const TARGET: &'static str = "float64";

    fn coerce(value: &Value) -> Result<Self, Fallback> {
        float(value)
    }
}
