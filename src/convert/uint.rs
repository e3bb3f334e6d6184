//! Unsigned integer coercion.
//!
//! Signed sources wrap (`-1i64` → `u32::MAX`), but signed *text* never does: a leading
//! `-` is a parse failure and yields `0` (or the default).

use std::str::FromStr;

use crate::types::Value;

use super::parse::{parse_unsigned, utf8};
use super::{Coerce, Fallback, Narrow, Numeric};

pub(crate) fn unsigned<T: Narrow + FromStr>(value: &Value) -> Result<T, Fallback> {
    if let Some(n) = Numeric::of(value) {
        return Ok(n.narrow());
    }
    match value {
        Value::Utf8(s) => parse_unsigned(s).ok_or(Fallback::Unparseable),
        Value::Bytes(b) => utf8(b)
            .and_then(parse_unsigned::<T>)
            .ok_or(Fallback::Unparseable),
        v if v.is_nil() => Err(Fallback::Absent),
        _ => Err(Fallback::Unsupported),
    }
}

macro_rules! unsigned_coercers {
    ($($t:ty, $target:literal => $to:ident, $to_default:ident;)*) => {
        $(
            #[doc = concat!("Coerce any value to `", stringify!($t), "`, returning `0` on failure.")]
            pub fn $to(value: &Value) -> $t {
                unsigned::<$t>(value).unwrap_or(0)
            }

            #[doc = concat!(
                "Like [`", stringify!($to), "`], but returns `default` for nil, unparseable ",
                "or unsupported values."
            )]
            pub fn $to_default(value: &Value, default: $t) -> $t {
                unsigned::<$t>(value).unwrap_or(default)
            }

            impl Coerce for $t {
                const TARGET: &'static str = $target;

                fn coerce(value: &Value) -> Result<Self, Fallback> {
                    unsigned(value)
                }
            }
        )*
    };
}

unsigned_coercers! {
    usize, "uint" => to_uint, to_uint_with_default;
    u8, "uint8" => to_uint8, to_uint8_with_default;
    u16, "uint16" => to_uint16, to_uint16_with_default;
    u32, "uint32" => to_uint32, to_uint32_with_default;
    u64, "uint64" => to_uint64, to_uint64_with_default;
}
