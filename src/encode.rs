//! Structural encoding of [`Value`]s.
//!
//! Coercers fall back to a structural encoding when a value has no scalar rendering
//! (`to_string` of a map, slice or struct) and decode serialized objects when asked to
//! build a map from text (`to_map` of a string). Both directions go through the
//! [`StructuralCodec`] interface; [`JsonCodec`] is the default implementation.
//!
//! Encoding rules:
//!
//! - map keys are rendered as strings and sorted; only string and integer keys are encodable
//! - non-finite floats, [`Value::Opaque`] values and unsupported map keys fail to encode
//! - [`Value::Duration`] encodes as its nanosecond count
//! - integral floats encode without a fraction (`1`, not `1.0`)
//! - [`Value::Bytes`] encodes as a standard base64 string
//! - nil pointers encode as `null`, non-nil pointers as their target
//! - structs encode as objects in field order

use base64::prelude::*;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

use crate::error::CoercionResult;
use crate::types::Value;

/// Encoder/decoder used by the coercers for structured values.
pub trait StructuralCodec: Send + Sync {
    /// Encode any value into its serialized text form.
    fn encode(&self, value: &Value) -> CoercionResult<String>;

    /// Decode serialized text that must describe an object into its key/value pairs.
    fn decode_object(&self, input: &[u8]) -> CoercionResult<Vec<(String, Value)>>;

    /// Decode serialized text that must describe an array into its elements.
    fn decode_array(&self, input: &[u8]) -> CoercionResult<Vec<Value>>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl StructuralCodec for JsonCodec {
    fn encode(&self, value: &Value) -> CoercionResult<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn decode_object(&self, input: &[u8]) -> CoercionResult<Vec<(String, Value)>> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(input)?;
        Ok(object
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect())
    }

    fn decode_array(&self, input: &[u8]) -> CoercionResult<Vec<Value>> {
        let items: Vec<serde_json::Value> = serde_json::from_slice(input)?;
        Ok(items.into_iter().map(Value::from).collect())
    }
}

/// Encode `value` with the default [`JsonCodec`].
pub fn encode_structural(value: &Value) -> CoercionResult<String> {
    JsonCodec.encode(value)
}

fn map_key(key: &Value) -> Option<String> {
    match key.deref_pointers() {
        Value::Utf8(s) => Some(s.clone()),
        Value::Int(v) => Some(v.to_string()),
        Value::Int8(v) => Some(v.to_string()),
        Value::Int16(v) => Some(v.to_string()),
        Value::Int32(v) => Some(v.to_string()),
        Value::Int64(v) => Some(v.to_string()),
        Value::Uint(v) => Some(v.to_string()),
        Value::Uint8(v) => Some(v.to_string()),
        Value::Uint16(v) => Some(v.to_string()),
        Value::Uint32(v) => Some(v.to_string()),
        Value::Uint64(v) => Some(v.to_string()),
        _ => None,
    }
}

fn finite<E: serde::ser::Error>(v: f64) -> Result<(), E> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(E::custom(format!("unsupported value: {v}")))
    }
}

/// Integral floats within `i64` range, as the integer they hold.
fn integral(v: f64) -> Option<i64> {
    (v.fract() == 0.0 && v.abs() < 9.0e18).then_some(v as i64)
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null | Value::Pointer(None) => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v as i64),
            Value::Int8(v) => serializer.serialize_i8(*v),
            Value::Int16(v) => serializer.serialize_i16(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Uint(v) => serializer.serialize_u64(*v as u64),
            Value::Uint8(v) => serializer.serialize_u8(*v),
            Value::Uint16(v) => serializer.serialize_u16(*v),
            Value::Uint32(v) => serializer.serialize_u32(*v),
            Value::Uint64(v) => serializer.serialize_u64(*v),
            Value::Float32(v) => {
                finite::<S::Error>(f64::from(*v))?;
                match integral(f64::from(*v)) {
                    Some(n) => serializer.serialize_i64(n),
                    None => serializer.serialize_f32(*v),
                }
            }
            Value::Float64(v) => {
                finite::<S::Error>(*v)?;
                match integral(*v) {
                    Some(n) => serializer.serialize_i64(n),
                    None => serializer.serialize_f64(*v),
                }
            }
            Value::Duration(d) => serializer.serialize_i64(d.as_nanos()),
            Value::Utf8(s) | Value::Error(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_str(&BASE64_STANDARD.encode(b)),
            Value::Map(pairs) => {
                let mut entries = pairs
                    .iter()
                    .map(|(k, v)| {
                        map_key(k).map(|key| (key, v)).ok_or_else(|| {
                            S::Error::custom(format!("unsupported map key type: {}", k.kind()))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                entries.sort_by(|a, b| a.0.cmp(&b.0));

                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key, value)?;
                }
                map.end()
            }
            Value::Slice(items) | Value::Array(items) => serializer.collect_seq(items),
            Value::Struct(record) => {
                let mut map = serializer.serialize_map(Some(record.fields.len()))?;
                for (name, value) in &record.fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            Value::Pointer(Some(inner)) => inner.serialize(serializer),
            Value::Opaque(type_name) => Err(S::Error::custom(format!(
                "unsupported type: {type_name}"
            ))),
        }
    }
}

/// Decoded JSON numbers always become [`Value::Float64`].
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::Utf8(s),
            serde_json::Value::Array(items) => {
                Value::Slice(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (Value::Utf8(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_structural, JsonCodec, StructuralCodec};
    use crate::types::{Duration, Record, Value};

    #[test]
    fn map_keys_are_stringified_and_sorted() {
        let m = Value::map([
            (Value::from("b"), Value::from(2i64)),
            (Value::from(1i32), Value::from("a")),
        ]);
        assert_eq!(encode_structural(&m).unwrap(), r#"{"1":"a","b":2}"#);
    }

    #[test]
    fn struct_fields_keep_declaration_order() {
        let r = Record::new("Point")
            .with_field("y", 2i32)
            .with_field("x", 1i32)
            .with_field("tag", Value::null_ptr());
        assert_eq!(
            encode_structural(&r.into()).unwrap(),
            r#"{"y":2,"x":1,"tag":null}"#
        );
    }

    #[test]
    fn pointers_and_durations_encode_as_their_targets() {
        assert_eq!(encode_structural(&Value::ptr(5i64)).unwrap(), "5");
        assert_eq!(
            encode_structural(&Value::Duration(Duration::from_secs(1))).unwrap(),
            "1000000000"
        );
    }

    #[test]
    fn floats_and_bytes_follow_json_conventions() {
        assert_eq!(
            encode_structural(&Value::slice([1.0f64, 2.5, -3.0])).unwrap(),
            "[1,2.5,-3]"
        );
        assert_eq!(encode_structural(&Value::slice([4.0f32, 0.5])).unwrap(), "[4,0.5]");
        assert_eq!(encode_structural(&Value::slice([1e20f64])).unwrap(), "[1e20]");
        assert_eq!(
            encode_structural(&Value::map([("raw", Value::Bytes(b"hi!".to_vec()))])).unwrap(),
            r#"{"raw":"aGkh"}"#
        );
    }

    #[test]
    fn unencodable_shapes_fail() {
        assert!(encode_structural(&Value::Opaque("func()".to_string())).is_err());
        assert!(encode_structural(&Value::slice([f64::NAN])).is_err());
        let bad_key = Value::map([(Value::Float64(1.5), Value::from(1i64))]);
        let err = encode_structural(&bad_key).unwrap_err();
        assert!(err.to_string().contains("unsupported map key type: float64"));
    }

    #[test]
    fn decode_object_maps_numbers_to_float64() {
        let pairs = JsonCodec
            .decode_object(br#"{"n":1,"s":"x","l":[true,null]}"#)
            .unwrap();
        let lookup = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.clone());
        assert_eq!(lookup("n"), Some(Value::Float64(1.0)));
        assert_eq!(lookup("s"), Some(Value::from("x")));
        assert_eq!(
            lookup("l"),
            Some(Value::Slice(vec![Value::Bool(true), Value::Null]))
        );
    }

    #[test]
    fn decode_object_rejects_non_objects() {
        assert!(JsonCodec.decode_object(b"[1,2]").is_err());
        assert!(JsonCodec.decode_object(b"not json").is_err());
    }

    #[test]
    fn decode_array_keeps_element_order() {
        assert_eq!(
            JsonCodec.decode_array(br#"["a",2,null]"#).unwrap(),
            vec![Value::from("a"), Value::Float64(2.0), Value::Null]
        );
        assert!(JsonCodec.decode_array(br#"{"a":1}"#).is_err());
    }
}
