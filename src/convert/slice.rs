//! Slice coercion.
//!
//! All slice coercers share one policy: a nil input (or nil pointer) gives `None`, an input
//! that is present but has no slice conversion gives `Some(vec![])`. Element order is
//! preserved and each element goes through the scalar coercer of the target type.
//!
//! [`Value::Slice`] and [`Value::Bytes`] (one `uint8` element per byte) count as slices for
//! the numeric coercers; fixed-size arrays do not. The string coercers treat text and bytes
//! as text instead, which is split on a separator (or decoded when it looks like a
//! serialized array). Any other shape gives an empty list.

use crate::encode::{JsonCodec, StructuralCodec};
use crate::types::Value;

use super::float::to_float64;
use super::int::to_int64;
use super::string::render;
use super::Fallback;

pub(crate) fn elements<T>(value: &Value, f: impl Fn(&Value) -> T) -> Result<Vec<T>, Fallback> {
    match value {
        Value::Slice(items) => Ok(items.iter().map(f).collect()),
        Value::Bytes(bytes) => Ok(bytes.iter().map(|b| f(&Value::Uint8(*b))).collect()),
        v if v.is_nil() => Err(Fallback::Absent),
        _ => Err(Fallback::Unsupported),
    }
}

pub(crate) fn settle<T>(result: Result<Vec<T>, Fallback>) -> Option<Vec<T>> {
    match result {
        Ok(items) => Some(items),
        Err(Fallback::Absent) => None,
        Err(_) => Some(Vec::new()),
    }
}

pub(crate) fn string_elements(
    value: &Value,
    sep: &str,
    codec: &dyn StructuralCodec,
) -> Result<Vec<String>, Fallback> {
    let text = |v: &Value| render(v, codec).unwrap_or_default();
    match value {
        Value::Slice(items) => Ok(items.iter().map(text).collect()),
        Value::Utf8(s) => Ok(split_text(s, sep, codec)),
        Value::Bytes(b) => Ok(split_text(&String::from_utf8_lossy(b), sep, codec)),
        v if v.is_nil() => Err(Fallback::Absent),
        _ => Err(Fallback::Unsupported),
    }
}

fn split_text(s: &str, sep: &str, codec: &dyn StructuralCodec) -> Vec<String> {
    if s.starts_with('[') && s.ends_with(']') {
        if let Ok(items) = codec.decode_array(s.as_bytes()) {
            return items
                .iter()
                .map(|v| render(v, codec).unwrap_or_default())
                .collect();
        }
    }
    if sep.is_empty() {
        vec![s.to_owned()]
    } else {
        s.split(sep).map(str::to_owned).collect()
    }
}

/// Coerce each element of a slice to `f64`.
///
/// ```rust
/// use rust_data_coercion::convert::to_float64_slice;
/// use rust_data_coercion::types::Value;
///
/// let v = Value::slice([Value::from("1.5"), Value::from(true), Value::from("x")]);
/// assert_eq!(to_float64_slice(&v), Some(vec![1.5, 1.0, 0.0]));
/// assert_eq!(to_float64_slice(&Value::Null), None);
/// assert_eq!(to_float64_slice(&Value::from(3i64)), Some(vec![]));
/// ```
pub fn to_float64_slice(value: &Value) -> Option<Vec<f64>> {
    settle(elements(value, to_float64))
}

/// Coerce each element of a slice to `i64`; same nil/unsupported policy as [`to_float64_slice`].
pub fn to_int64_slice(value: &Value) -> Option<Vec<i64>> {
    settle(elements(value, to_int64))
}

/// [`to_string_slice_with`] using `","` as the separator.
pub fn to_string_slice(value: &Value) -> Option<Vec<String>> {
    to_string_slice_with(value, ",")
}

/// Coerce a value to a list of strings.
///
/// - slices: each element through [`super::to_string`]
/// - text and bytes: decoded when it looks like a serialized array (`[...]`), otherwise
///   split on `sep`; an empty `sep` keeps the text whole
/// - nil: `None`
/// - any other value: `Some(vec![])`
pub fn to_string_slice_with(value: &Value, sep: &str) -> Option<Vec<String>> {
    settle(string_elements(value, sep, &JsonCodec))
}

/// Like [`to_string_slice`], but a nil input gives an empty list as well.
pub fn to_array_string(value: &Value) -> Vec<String> {
    to_string_slice(value).unwrap_or_default()
}
