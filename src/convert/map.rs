//! Map coercion.
//!
//! Only [`Value::Map`] inputs produce entries; every other shape yields an empty map, except
//! that [`to_map`] first tries to decode text as a serialized object and
//! [`to_map_string_array_string`] panics. Keys and values go through the scalar coercers of
//! the target types, so two source keys that render identically collapse into one entry
//! (the later pair wins). Result iteration order is unspecified.

use std::collections::HashMap;
use std::hash::Hash;

use crate::encode::{JsonCodec, StructuralCodec};
use crate::error::{CoercionError, CoercionResult};
use crate::types::Value;

use super::int::{to_int32, to_int64};
use super::slice::to_array_string;
use super::string::{render, to_string};
use super::Fallback;

fn collect_map<K, V>(
    value: &Value,
    key: impl Fn(&Value) -> K,
    val: impl Fn(&Value) -> V,
) -> HashMap<K, V>
where
    K: Eq + Hash,
{
    match value {
        Value::Map(pairs) => pairs.iter().map(|(k, v)| (key(k), val(v))).collect(),
        _ => HashMap::new(),
    }
}

pub(crate) fn map_with(
    value: &Value,
    codec: &dyn StructuralCodec,
) -> Result<HashMap<String, Value>, Fallback> {
    let decode = |input: &[u8]| -> Result<HashMap<String, Value>, Fallback> {
        codec
            .decode_object(input)
            .map(|pairs| pairs.into_iter().collect())
            .map_err(|_| Fallback::Unparseable)
    };
    match value {
        Value::Utf8(s) => decode(s.as_bytes()),
        Value::Bytes(b) => decode(b),
        Value::Map(pairs) => Ok(pairs
            .iter()
            .map(|(k, v)| (render(k, codec).unwrap_or_default(), v.clone()))
            .collect()),
        v if v.is_nil() => Err(Fallback::Absent),
        _ => Err(Fallback::Unsupported),
    }
}

/// Coerce a value to a string-keyed map.
///
/// Text and byte inputs are decoded as a serialized object; when that fails (or for any
/// other shape) this behaves like [`to_map_string_any`].
///
/// ```rust
/// use rust_data_coercion::convert::to_map;
/// use rust_data_coercion::types::Value;
///
/// let m = to_map(&Value::from(r#"{"id": 7}"#));
/// assert_eq!(m["id"], Value::Float64(7.0));
/// assert!(to_map(&Value::from("not an object")).is_empty());
/// ```
pub fn to_map(value: &Value) -> HashMap<String, Value> {
    map_with(value, &JsonCodec).unwrap_or_default()
}

/// String keys, values kept as they are.
pub fn to_map_string_any(value: &Value) -> HashMap<String, Value> {
    collect_map(value, to_string, Value::clone)
}

/// String keys and string values.
pub fn to_map_string_string(value: &Value) -> HashMap<String, String> {
    collect_map(value, to_string, to_string)
}

/// String keys and `i64` values.
pub fn to_map_string_int64(value: &Value) -> HashMap<String, i64> {
    collect_map(value, to_string, to_int64)
}

/// `i64` keys and string values.
pub fn to_map_int64_string(value: &Value) -> HashMap<i64, String> {
    collect_map(value, to_int64, to_string)
}

/// `i32` keys and string values.
pub fn to_map_int32_string(value: &Value) -> HashMap<i32, String> {
    collect_map(value, to_int32, to_string)
}

/// String keys and string-list values, each value coerced with [`to_array_string`].
///
/// Returns [`CoercionError::NotAMap`] when `value` is not a map.
pub fn try_to_map_string_array_string(
    value: &Value,
) -> CoercionResult<HashMap<String, Vec<String>>> {
    match value {
        Value::Map(_) => Ok(collect_map(value, to_string, to_array_string)),
        other => Err(CoercionError::NotAMap { kind: other.kind() }),
    }
}

/// Panicking form of [`try_to_map_string_array_string`].
///
/// # Panics
///
/// Panics when `value` is not a map (nil included).
pub fn to_map_string_array_string(value: &Value) -> HashMap<String, Vec<String>> {
    try_to_map_string_array_string(value).unwrap_or_else(|err| panic!("{err}"))
}
