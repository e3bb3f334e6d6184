//! Name-based field extraction over [`Value`] sequences.
//!
//! This is a compatibility layer for call sites that only know a field by name. Unlike the
//! selector-based functions in [`super::typed`], every misuse is rejected:
//!
//! - the list must be a [`Value::Slice`] or [`Value::Array`]
//! - each element, after following pointers, must be a [`Value::Struct`]
//! - all elements must share one struct type name
//! - the field must exist on that type and hold exactly the requested type
//!
//! The `pluck_*` functions flatten a list of lists one level first. The `key_by*` functions
//! index elements by a field instead and skip nil elements.
//!
//! An empty list always succeeds with an empty result. The `try_*` functions return these
//! violations as [`CoercionError`]s; the others panic with the same message.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{CoercionError, CoercionResult};
use crate::types::{Record, Value};

/// A field type that can be extracted by name.
///
/// Extraction is exact: an `Int64` field is not an `i32`, and no coercion is attempted.
pub trait FieldValue: Sized {
    /// Type name reported in [`CoercionError::FieldTypeMismatch`].
    const TYPE_NAME: &'static str;

    /// Returns `None` when `value` does not hold this exact type.
    fn from_field(value: &Value) -> Option<Self>;
}

macro_rules! impl_field_value {
    ($($t:ty, $name:literal, $variant:ident;)*) => {
        $(
            impl FieldValue for $t {
                const TYPE_NAME: &'static str = $name;

                fn from_field(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value! {
    isize, "int", Int;
    i32, "int32", Int32;
    i64, "int64", Int64;
    u32, "uint32", Uint32;
    u64, "uint64", Uint64;
    String, "string", Utf8;
}

/// A nil slice field reads as an empty list.
impl FieldValue for Vec<String> {
    const TYPE_NAME: &'static str = "[]string";

    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Vec::new()),
            Value::Slice(items) => items
                .iter()
                .map(|item| match item {
                    Value::Utf8(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

fn sequence(list: &Value) -> CoercionResult<&[Value]> {
    match list {
        Value::Slice(items) | Value::Array(items) => Ok(items),
        other => Err(CoercionError::NotASequence { kind: other.kind() }),
    }
}

/// Elements of `list`. When the first element is itself a sequence, every element must be
/// one and the result is flattened one level (the flag is then `true`).
fn flatten(list: &Value) -> CoercionResult<(Vec<&Value>, bool)> {
    let items = sequence(list)?;
    let nested = items.first().is_some_and(|first| {
        matches!(first.deref_pointers(), Value::Slice(_) | Value::Array(_))
    });
    if !nested {
        return Ok((items.iter().collect(), false));
    }

    let mut out = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match item.deref_pointers() {
            Value::Slice(inner) | Value::Array(inner) => out.extend(inner),
            other => {
                return Err(CoercionError::NotANestedSequence {
                    index,
                    kind: other.kind(),
                });
            }
        }
    }
    Ok((out, true))
}

/// Pairs each element with the struct behind it, checking that all structs share one type.
/// With `skip_nil`, nil elements are left out instead of rejected.
fn records<'a>(
    items: &[&'a Value],
    skip_nil: bool,
) -> CoercionResult<Vec<(&'a Value, &'a Record)>> {
    let mut type_name: Option<&str> = None;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().copied().enumerate() {
        let record = match item.deref_pointers() {
            Value::Struct(record) => record,
            other if skip_nil && other.is_nil() => continue,
            other => {
                return Err(CoercionError::NotAStruct {
                    index,
                    kind: other.kind(),
                });
            }
        };

        match type_name {
            None => type_name = Some(record.type_name.as_str()),
            Some(expected) if expected != record.type_name => {
                return Err(CoercionError::MixedElementTypes {
                    index,
                    expected: expected.to_string(),
                    found: record.type_name.clone(),
                });
            }
            Some(_) => {}
        }
        out.push((item, record));
    }
    Ok(out)
}

fn field_of<'a>(record: &'a Record, field: &str) -> CoercionResult<&'a Value> {
    record
        .get(field)
        .ok_or_else(|| CoercionError::FieldNotFound {
            field: field.to_string(),
            type_name: record.type_name.clone(),
        })
}

/// Extract `field` from every struct element of `list` as `T`.
///
/// A list of lists is flattened one level first. If the flattened elements are structs the
/// field is read from each; otherwise the elements themselves are returned and must hold
/// exactly `T` (the field name is then unused).
///
/// ```rust
/// use rust_data_coercion::pluck::try_pluck_as;
/// use rust_data_coercion::types::{Record, Value};
///
/// let people = Value::slice([
///     Record::new("Person").with_field("Age", 36i64),
///     Record::new("Person").with_field("Age", 41i64),
/// ]);
/// assert_eq!(try_pluck_as::<i64>(&people, "Age").unwrap(), vec![36, 41]);
/// assert!(try_pluck_as::<i32>(&people, "Age").is_err());
///
/// let batches = Value::slice([Value::slice([1i64, 2]), Value::slice([3i64])]);
/// assert_eq!(try_pluck_as::<i64>(&batches, "").unwrap(), vec![1, 2, 3]);
/// ```
pub fn try_pluck_as<T: FieldValue>(list: &Value, field: &str) -> CoercionResult<Vec<T>> {
    let (items, nested) = flatten(list)?;
    let plain_values = nested
        && items
            .first()
            .is_some_and(|first| !matches!(first.deref_pointers(), Value::Struct(_)));
    if plain_values {
        return items
            .iter()
            .enumerate()
            .map(|(index, value)| {
                T::from_field(value).ok_or_else(|| CoercionError::ElementTypeMismatch {
                    index,
                    expected: T::TYPE_NAME,
                    found: value.kind(),
                })
            })
            .collect();
    }

    records(&items, false)?
        .into_iter()
        .map(|(_, record)| {
            let value = field_of(record, field)?;
            T::from_field(value).ok_or_else(|| CoercionError::FieldTypeMismatch {
                field: field.to_string(),
                expected: T::TYPE_NAME,
                found: value.kind(),
            })
        })
        .collect()
}

/// Panicking form of [`try_pluck_as`].
///
/// # Panics
///
/// Panics with the [`CoercionError`] message on any precondition violation.
pub fn pluck_as<T: FieldValue>(list: &Value, field: &str) -> Vec<T> {
    try_pluck_as(list, field).unwrap_or_else(|err| panic!("{err}"))
}

macro_rules! named_plucks {
    ($($t:ty => $pluck:ident, $try_pluck:ident;)*) => {
        $(
            #[doc = concat!("[`try_pluck_as`] for `", stringify!($t), "` fields.")]
            pub fn $try_pluck(list: &Value, field: &str) -> CoercionResult<Vec<$t>> {
                try_pluck_as(list, field)
            }

            #[doc = concat!("[`pluck_as`] for `", stringify!($t), "` fields.")]
            ///
            /// # Panics
            ///
            /// Panics on any precondition violation (see the module docs).
            pub fn $pluck(list: &Value, field: &str) -> Vec<$t> {
                pluck_as(list, field)
            }
        )*
    };
}

named_plucks! {
    isize => pluck_int, try_pluck_int;
    i32 => pluck_int32, try_pluck_int32;
    i64 => pluck_int64, try_pluck_int64;
    u32 => pluck_uint32, try_pluck_uint32;
    u64 => pluck_uint64, try_pluck_uint64;
    String => pluck_string, try_pluck_string;
    Vec<String> => pluck_string_slice, try_pluck_string_slice;
}

fn try_key_by_with<K: Eq + Hash>(
    list: &Value,
    field: &str,
    expected: &'static str,
    key: impl Fn(&Value) -> Option<K>,
) -> CoercionResult<HashMap<K, Value>> {
    let items: Vec<&Value> = sequence(list)?.iter().collect();
    let mut out = HashMap::with_capacity(items.len());
    for (element, record) in records(&items, true)? {
        let value = field_of(record, field)?;
        let k = key(value).ok_or_else(|| CoercionError::FieldTypeMismatch {
            field: field.to_string(),
            expected,
            found: value.kind(),
        })?;
        out.insert(k, element.clone());
    }
    Ok(out)
}

/// Index the struct elements of `list` by `field`, which must hold exactly `K`.
///
/// Values are the elements as given (pointers included). Nil elements are skipped and a
/// later element replaces an earlier one with the same key.
pub fn try_key_by<K: FieldValue + Eq + Hash>(
    list: &Value,
    field: &str,
) -> CoercionResult<HashMap<K, Value>> {
    try_key_by_with(list, field, K::TYPE_NAME, K::from_field)
}

/// Panicking form of [`try_key_by`].
///
/// # Panics
///
/// Panics with the [`CoercionError`] message on any precondition violation.
pub fn key_by<K: FieldValue + Eq + Hash>(list: &Value, field: &str) -> HashMap<K, Value> {
    try_key_by(list, field).unwrap_or_else(|err| panic!("{err}"))
}

fn signed(value: &Value) -> Option<i64> {
    match value {
        Value::Int(v) => Some(*v as i64),
        Value::Int8(v) => Some(i64::from(*v)),
        Value::Int16(v) => Some(i64::from(*v)),
        Value::Int32(v) => Some(i64::from(*v)),
        Value::Int64(v) => Some(*v),
        Value::Duration(d) => Some(d.as_nanos()),
        _ => None,
    }
}

fn unsigned(value: &Value) -> Option<u64> {
    match value {
        Value::Uint(v) => Some(*v as u64),
        Value::Uint8(v) => Some(u64::from(*v)),
        Value::Uint16(v) => Some(u64::from(*v)),
        Value::Uint32(v) => Some(u64::from(*v)),
        Value::Uint64(v) => Some(*v),
        _ => None,
    }
}

/// Like [`try_key_by`], accepting a field of any signed integer width.
pub fn try_key_by_int64(list: &Value, field: &str) -> CoercionResult<HashMap<i64, Value>> {
    try_key_by_with(list, field, "signed integer", signed)
}

/// Panicking form of [`try_key_by_int64`].
pub fn key_by_int64(list: &Value, field: &str) -> HashMap<i64, Value> {
    try_key_by_int64(list, field).unwrap_or_else(|err| panic!("{err}"))
}

/// Like [`try_key_by`], accepting a field of any unsigned integer width.
pub fn try_key_by_uint64(list: &Value, field: &str) -> CoercionResult<HashMap<u64, Value>> {
    try_key_by_with(list, field, "unsigned integer", unsigned)
}

/// Panicking form of [`try_key_by_uint64`].
pub fn key_by_uint64(list: &Value, field: &str) -> HashMap<u64, Value> {
    try_key_by_uint64(list, field).unwrap_or_else(|err| panic!("{err}"))
}
