//! `rust-data-coercion` converts loosely-typed runtime values into concrete Rust types.
//!
//! Inputs are modelled as a closed [`types::Value`] enum (nil, booleans, every integer and
//! float width, durations, text, bytes, errors, maps, slices, arrays, structs, pointers).
//! The [`convert`] module turns any of them into scalars, maps or slices; the [`pluck`]
//! module extracts one field from every element of a struct sequence; [`value_map`] reads
//! keyed payloads through the coercers.
//!
//! ## Two failure policies
//!
//! - **Soft-fail** (almost everything): a value that cannot be converted degrades to the
//!   target's zero value, or to a caller-supplied default for the `*_with_default` variants.
//!   These functions never panic.
//! - **Hard-fail**: [`convert::to_map_string_array_string`] and the by-name `pluck_*` and
//!   `key_by*` functions treat a wrong input shape as a programmer error and panic with a
//!   [`CoercionError`] message. Each has a `try_*` twin returning [`CoercionResult`].
//!
//! ## Quick examples
//!
//! ```rust
//! use rust_data_coercion::convert::{
//!     to_bool, to_float64, to_int64_with_default, to_map_string_string, to_string, to_uint32,
//! };
//! use rust_data_coercion::types::Value;
//!
//! assert!(to_bool(&Value::from("1")));
//! assert_eq!(to_int64_with_default(&Value::from("n/a"), -1), -1);
//! assert_eq!(to_uint32(&Value::from("-123")), 0);
//! assert_eq!(to_float64(&Value::from("0xFF")), 255.0);
//! assert_eq!(to_string(&Value::Float64(100.0)), "100");
//!
//! let m = to_map_string_string(&Value::map([
//!     (Value::from(1i64), Value::from("a")),
//!     (Value::from("b"), Value::from(2i64)),
//! ]));
//! assert_eq!(m["1"], "a");
//! assert_eq!(m["b"], "2");
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the source value model
//! - [`convert`]: scalar and structural coercers, the configured [`convert::Coercer`] and
//!   its observers
//! - [`encode`]: the structural codec used for nested values
//! - [`pluck`]: field extraction and by-field indexing
//! - [`value_map`]: keyed access with coercing getters and nested-path lookup
//! - [`error`]: error types used by the hard-fail functions

pub mod convert;
pub mod encode;
pub mod error;
pub mod pluck;
pub mod types;
pub mod value_map;

pub use error::{CoercionError, CoercionResult};
