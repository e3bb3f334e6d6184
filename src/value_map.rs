//! A string-keyed bag of [`Value`]s with coercing getters.
//!
//! [`ValueMap`] is the usual way to read loosely-typed configuration or decoded payloads:
//! every `get_*` getter looks the key up and runs the matching coercer from
//! [`crate::convert`], so a missing key and an unconvertible value both read as the zero
//! value. [`ValueMap::get`] and [`ValueMap::exists`] tell the two apart.
//!
//! With path lookup enabled, a key that is not stored as-is is split on the separator and
//! resolved through nested values: maps, structs, and text or bytes holding a serialized
//! object.
//!
//! ```rust
//! use rust_data_coercion::value_map::ValueMap;
//!
//! let mut cfg = ValueMap::from_json(br#"{"db": {"port": "5432", "hosts": ["a", "b"]}}"#)?;
//! assert_eq!(cfg.get_uint16("db.port"), 0);
//!
//! cfg.enable_path_lookup(".");
//! assert_eq!(cfg.get_uint16("db.port"), 5432);
//! assert_eq!(cfg.get_string_slice("db.hosts"), Some(vec!["a".to_string(), "b".to_string()]));
//! assert!(!cfg.exists("db.user"));
//! # Ok::<(), rust_data_coercion::CoercionError>(())
//! ```

use std::collections::HashMap;

use crate::convert::slice::elements;
use crate::convert::{
    to_bool, to_bytes, to_float64, to_int, to_int32, to_int64, to_int64_slice, to_map,
    to_map_string_any, to_string, to_uint16, to_uint32, to_uint64,
};
use crate::encode::{JsonCodec, StructuralCodec};
use crate::error::{CoercionError, CoercionResult};
use crate::types::Value;

/// String-keyed values with coercing accessors and optional nested-path lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap {
    data: HashMap<String, Value>,
    path_separator: Option<String>,
}

macro_rules! coercing_getters {
    ($($name:ident -> $t:ty => $coerce:ident;)*) => {
        $(
            pub fn $name(&self, key: &str) -> $t {
                self.lookup(key).map(|v| $coerce(&v)).unwrap_or_default()
            }
        )*
    };
}

impl ValueMap {
    pub fn new(data: HashMap<String, Value>) -> Self {
        Self {
            data,
            path_separator: None,
        }
    }

    /// Decode a serialized JSON object.
    pub fn from_json(input: &[u8]) -> CoercionResult<Self> {
        let pairs = JsonCodec.decode_object(input)?;
        Ok(Self::new(pairs.into_iter().collect()))
    }

    /// Decode a YAML mapping. Non-string keys are rendered with [`to_string`].
    pub fn from_yaml(input: &[u8]) -> CoercionResult<Self> {
        let mapping: serde_yaml::Mapping = serde_yaml::from_slice(input)?;
        Ok(Self::new(
            mapping
                .into_iter()
                .map(|(k, v)| (to_string(&from_yaml_value(k)), from_yaml_value(v)))
                .collect(),
        ))
    }

    /// Build from any value the way path lookup reads nested values; other shapes give an
    /// empty map.
    pub fn from_value(value: &Value) -> Self {
        Self::new(nested(value))
    }

    /// Resolve keys not stored as-is by splitting them on `separator`.
    pub fn enable_path_lookup(&mut self, separator: impl Into<String>) -> &mut Self {
        self.path_separator = Some(separator.into());
        self
    }

    pub fn disable_path_lookup(&mut self) -> &mut Self {
        self.path_separator = None;
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Returns [`CoercionError::KeyNotFound`] when neither the key nor its path resolves.
    pub fn get(&self, key: &str) -> CoercionResult<Value> {
        self.lookup(key).ok_or_else(|| CoercionError::KeyNotFound {
            key: key.to_string(),
        })
    }

    pub fn exists(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    coercing_getters! {
        get_bool -> bool => to_bool;
        get_int -> isize => to_int;
        get_int32 -> i32 => to_int32;
        get_int64 -> i64 => to_int64;
        get_uint16 -> u16 => to_uint16;
        get_uint32 -> u32 => to_uint32;
        get_uint64 -> u64 => to_uint64;
        get_float64 -> f64 => to_float64;
        get_string -> String => to_string;
    }

    /// Scalars and text as bytes (floats in shortest form); every other shape, and a missing
    /// key, gives an empty vector.
    pub fn get_bytes(&self, key: &str) -> Vec<u8> {
        match self.lookup(key) {
            Some(Value::Bytes(b)) => b,
            Some(Value::Float32(v)) => v.to_string().into_bytes(),
            Some(Value::Float64(v)) => v.to_string().into_bytes(),
            Some(
                v @ (Value::Bool(_)
                | Value::Int(_)
                | Value::Int8(_)
                | Value::Int16(_)
                | Value::Int32(_)
                | Value::Int64(_)
                | Value::Uint(_)
                | Value::Uint8(_)
                | Value::Uint16(_)
                | Value::Uint32(_)
                | Value::Uint64(_)
                | Value::Utf8(_)),
            ) => to_bytes(&v),
            _ => Vec::new(),
        }
    }

    /// The nested map under `key`; empty when missing or not map-like.
    pub fn get_map(&self, key: &str) -> ValueMap {
        self.lookup(key)
            .map(|v| Self::from_value(&v))
            .unwrap_or_default()
    }

    /// Elements of the slice (or bytes) under `key`.
    ///
    /// `None` when the key is missing; `Some(vec![])` when the value is not a slice.
    pub fn get_slice(&self, key: &str) -> Option<Vec<Value>> {
        self.slice_of(key, Value::clone)
    }

    /// Like [`ValueMap::get_slice`], each element through [`to_string`]. Text is not split.
    pub fn get_string_slice(&self, key: &str) -> Option<Vec<String>> {
        self.slice_of(key, to_string)
    }

    pub fn get_uint32_slice(&self, key: &str) -> Option<Vec<u32>> {
        self.slice_of(key, to_uint32)
    }

    pub fn get_uint64_slice(&self, key: &str) -> Option<Vec<u64>> {
        self.slice_of(key, to_uint64)
    }

    /// [`to_int64_slice`] of the value under `key`.
    pub fn get_int64_slice(&self, key: &str) -> Option<Vec<i64>> {
        self.lookup(key).and_then(|v| to_int64_slice(&v))
    }

    /// Copy of the stored entries, integral floats narrowed to integers
    /// (`Float32` to `Int32`, `Float64` to `Int64`).
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::Float32(f) if f.fract() == 0.0 => Value::Int32(*f as i32),
                    Value::Float64(f) if f.fract() == 0.0 => Value::Int64(*f as i64),
                    other => other.clone(),
                };
                (k.clone(), v)
            })
            .collect()
    }

    fn slice_of<T>(&self, key: &str, f: impl Fn(&Value) -> T) -> Option<Vec<T>> {
        self.lookup(key)
            .map(|v| elements(&v, f).unwrap_or_default())
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.data.get(key) {
            return Some(value.clone());
        }
        let separator = self.path_separator.as_deref().filter(|s| !s.is_empty())?;
        let segments: Vec<&str> = key.split(separator).collect();
        let (last, path) = segments.split_last()?;
        let (first, rest) = path.split_first()?;

        let mut scope = nested(self.data.get(*first)?);
        for segment in rest {
            scope = nested(scope.get(*segment)?);
        }
        scope.get(*last).cloned()
    }
}

impl From<HashMap<String, Value>> for ValueMap {
    fn from(data: HashMap<String, Value>) -> Self {
        Self::new(data)
    }
}

/// The entries a value exposes to path lookup.
fn nested(value: &Value) -> HashMap<String, Value> {
    match value {
        Value::Utf8(_) | Value::Bytes(_) => to_map(value),
        Value::Map(_) => to_map_string_any(value),
        Value::Struct(record) => record.fields.iter().cloned().collect(),
        Value::Pointer(Some(inner)) => nested(inner),
        _ => HashMap::new(),
    }
}

fn from_yaml_value(v: serde_yaml::Value) -> Value {
    match v {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint64(u)
            } else {
                n.as_f64().map(Value::Float64).unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::Utf8(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Slice(items.into_iter().map(from_yaml_value).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Map(
            mapping
                .into_iter()
                .map(|(k, v)| (from_yaml_value(k), from_yaml_value(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_yaml_value(tagged.value),
    }
}
