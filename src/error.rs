use thiserror::Error;

use crate::types::Kind;

/// Convenience result type for fallible coercion operations.
pub type CoercionResult<T> = Result<T, CoercionError>;

/// Error type returned by the hard-fail coercers and the structural codec.
///
/// Soft-fail coercers never produce this type; they degrade to a zero value or a
/// caller-supplied default instead. The panicking forms of the hard-fail functions
/// (`pluck_*`, `key_by*`, [`crate::convert::to_map_string_array_string`]) panic with this
/// message.
#[derive(Debug, Error)]
pub enum CoercionError {
    /// Structural encoding/decoding failed (unsupported shape, non-finite float, bad input).
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A [`crate::value_map::ValueMap`] lookup found nothing under the key or path.
    #[error("key {key} not found")]
    KeyNotFound { key: String },

    /// A map-shaped value was required.
    #[error("value must be a map, got {kind}")]
    NotAMap { kind: Kind },

    /// A slice or array was required.
    #[error("list must be an array or slice, got {kind}")]
    NotASequence { kind: Kind },

    /// In a sequence of sequences, an element is not itself a sequence.
    #[error("element {index} is not an array or slice (got {kind})")]
    NotANestedSequence { index: usize, kind: Kind },

    /// A flattened element does not hold the requested type.
    #[error("element {index} has type {found}, expected {expected}")]
    ElementTypeMismatch {
        index: usize,
        expected: &'static str,
        found: Kind,
    },

    /// A sequence element is not a struct after pointer dereferencing.
    #[error("element {index} is not a struct (got {kind})")]
    NotAStruct { index: usize, kind: Kind },

    /// Sequence elements are structs of different types.
    #[error("element {index} has struct type '{found}', expected '{expected}'")]
    MixedElementTypes {
        index: usize,
        expected: String,
        found: String,
    },

    /// The named field does not exist on the element struct type.
    #[error("field {field} not found on struct '{type_name}'")]
    FieldNotFound { field: String, type_name: String },

    /// The named field exists but its type differs from the requested one.
    #[error("field {field} has type {found}, expected {expected}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        found: Kind,
    },
}
