//! Coercion of [`crate::types::Value`]s into concrete Rust types.
//!
//! Most callers use the named functions ([`to_int64`], [`to_string`], [`to_map_string_string`],
//! ...) or the generic [`coerce_to`]/[`coerce_or`]. Every scalar coercer is total: a value
//! that cannot be converted degrades to the target's zero value (or the supplied default for
//! the `*_with_default` variants). Only [`to_map_string_array_string`] (and the reflective
//! `pluck_*` family in [`crate::pluck`]) treat a wrong input shape as a programmer error.
//!
//! To observe fallbacks (for logging or alerting), coerce through a [`Coercer`] configured
//! with a [`CoercionObserver`].
//!
//! ## Conversion rules
//!
//! - `true`/`false` become `1`/`0` for numeric targets and `"1"`/`"0"` for strings.
//! - Integer → integer conversions wrap (two's-complement truncation), including signed
//!   sources on unsigned targets.
//! - Float → integer conversions truncate toward zero and saturate at the target bounds;
//!   NaN becomes `0`, negative values become `0` on unsigned targets.
//! - Strings and UTF-8 byte sequences parse base-10 for integer targets (no sign allowed for
//!   unsigned ones); float targets parse a float first and then retry as a prefixed integer
//!   literal (`0x`, `0o`, `0b`).
//! - Durations coerce as their nanosecond count.
//!
//! ```rust
//! use rust_data_coercion::convert::{to_float64, to_string, to_uint32};
//! use rust_data_coercion::types::Value;
//!
//! assert_eq!(to_float64(&Value::from("0xFF")), 255.0);
//! assert_eq!(to_uint32(&Value::from("-123")), 0);
//! assert_eq!(to_uint32(&Value::Uint64(0xFFFF_FFFF_1234_5678)), 0x1234_5678);
//! assert_eq!(to_string(&Value::Float64(3.14159)), "3.141590");
//! ```

use std::fmt;

use crate::encode::StructuralCodec;
use crate::types::Value;

pub mod boolean;
pub mod coercer;
pub mod float;
pub mod int;
pub mod map;
pub mod observability;
pub mod parse;
pub mod slice;
pub mod string;
pub mod uint;

pub use boolean::to_bool;
pub use coercer::{Coercer, CoercionOptions};
pub use float::{to_float32, to_float32_with_default, to_float64, to_float64_with_default};
pub use int::{
    to_int, to_int16, to_int16_with_default, to_int32, to_int32_with_default, to_int64,
    to_int64_with_default, to_int8, to_int8_with_default, to_int_with_default,
};
pub use map::{
    to_map, to_map_int32_string, to_map_int64_string, to_map_string_any,
    to_map_string_array_string, to_map_string_int64, to_map_string_string,
    try_to_map_string_array_string,
};
pub use observability::{
    CoercionContext, CoercionObserver, CoercionSeverity, CompositeObserver, FileObserver,
    StdErrObserver,
};
pub use slice::{
    to_array_string, to_float64_slice, to_int64_slice, to_string_slice, to_string_slice_with,
};
pub use string::{to_bytes, to_string};
pub use uint::{
    to_uint, to_uint16, to_uint16_with_default, to_uint32, to_uint32_with_default, to_uint64,
    to_uint64_with_default, to_uint8, to_uint8_with_default, to_uint_with_default,
};

/// Why a coercion degraded to a zero value or default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// The input was nil or a nil pointer.
    Absent,
    /// A string or byte sequence did not parse for the target.
    Unparseable,
    /// The input shape has no conversion to the target.
    Unsupported,
    /// A structured value could not be encoded.
    Unencodable,
}

impl Fallback {
    /// Severity reported to observers for this fallback.
    pub fn severity(self) -> CoercionSeverity {
        match self {
            Fallback::Absent => CoercionSeverity::Info,
            Fallback::Unparseable | Fallback::Unsupported => CoercionSeverity::Warning,
            Fallback::Unencodable => CoercionSeverity::Error,
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Fallback::Absent => "absent",
            Fallback::Unparseable => "unparseable",
            Fallback::Unsupported => "unsupported",
            Fallback::Unencodable => "unencodable",
        })
    }
}

/// A target type that any [`Value`] can be coerced into.
pub trait Coerce: Sized {
    /// Target type name reported in [`CoercionContext::target`].
    const TARGET: &'static str;

    /// Convert `value`, or explain why it degraded.
    fn coerce(value: &Value) -> Result<Self, Fallback>;

    /// Like [`Coerce::coerce`], encoding structured values with `codec` where the target
    /// needs an encoding. Only text targets do.
    fn coerce_with(value: &Value, _codec: &dyn StructuralCodec) -> Result<Self, Fallback> {
        Self::coerce(value)
    }
}

/// Coerce `value` into `T`, returning `T::default()` on failure.
///
/// ```rust
/// use rust_data_coercion::convert::coerce_to;
/// use rust_data_coercion::types::Value;
///
/// let n: i16 = coerce_to(&Value::from("42"));
/// assert_eq!(n, 42);
/// let b: bool = coerce_to(&Value::from("yes"));
/// assert!(!b);
/// ```
pub fn coerce_to<T: Coerce + Default>(value: &Value) -> T {
    T::coerce(value).unwrap_or_default()
}

/// Coerce `value` into `T`, returning `default` on failure.
pub fn coerce_or<T: Coerce>(value: &Value, default: T) -> T {
    T::coerce(value).unwrap_or(default)
}

/// Numeric view of a scalar source before narrowing to the target width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Numeric {
    /// Returns `None` for every non-numeric shape (strings included).
    pub(crate) fn of(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Bool(v) => Numeric::Unsigned(u64::from(*v)),
            Value::Int(v) => Numeric::Signed(*v as i64),
            Value::Int8(v) => Numeric::Signed(i64::from(*v)),
            Value::Int16(v) => Numeric::Signed(i64::from(*v)),
            Value::Int32(v) => Numeric::Signed(i64::from(*v)),
            Value::Int64(v) => Numeric::Signed(*v),
            Value::Uint(v) => Numeric::Unsigned(*v as u64),
            Value::Uint8(v) => Numeric::Unsigned(u64::from(*v)),
            Value::Uint16(v) => Numeric::Unsigned(u64::from(*v)),
            Value::Uint32(v) => Numeric::Unsigned(u64::from(*v)),
            Value::Uint64(v) => Numeric::Unsigned(*v),
            Value::Float32(v) => Numeric::Float(f64::from(*v)),
            Value::Float64(v) => Numeric::Float(*v),
            Value::Duration(d) => Numeric::Signed(d.as_nanos()),
            _ => return None,
        })
    }

    pub(crate) fn narrow<T: Narrow>(self) -> T {
        match self {
            Numeric::Signed(v) => T::from_i64(v),
            Numeric::Unsigned(v) => T::from_u64(v),
            Numeric::Float(v) => T::from_f64(v),
        }
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Numeric::Signed(v) => v == 0,
            Numeric::Unsigned(v) => v == 0,
            Numeric::Float(v) => v == 0.0,
        }
    }
}

/// Primitive numeric conversion with `as` semantics.
pub(crate) trait Narrow: Copy {
    fn from_i64(v: i64) -> Self;
    fn from_u64(v: u64) -> Self;
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_narrow {
    ($($t:ty),* $(,)?) => {
        $(
            impl Narrow for $t {
                fn from_i64(v: i64) -> Self {
                    v as $t
                }

                fn from_u64(v: u64) -> Self {
                    v as $t
                }

                fn from_f64(v: f64) -> Self {
                    v as $t
                }
            }
        )*
    };
}

impl_narrow!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
