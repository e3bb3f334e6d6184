//! Signed integer coercion.

use std::str::FromStr;

use crate::types::Value;

use super::parse::{parse_signed, utf8};
use super::{Coerce, Fallback, Narrow, Numeric};

pub(crate) fn signed<T: Narrow + FromStr>(value: &Value) -> Result<T, Fallback> {
    if let Some(n) = Numeric::of(value) {
        return Ok(n.narrow());
    }
    match value {
        Value::Utf8(s) => parse_signed(s).ok_or(Fallback::Unparseable),
        Value::Bytes(b) => utf8(b)
            .and_then(parse_signed::<T>)
            .ok_or(Fallback::Unparseable),
        v if v.is_nil() => Err(Fallback::Absent),
        _ => Err(Fallback::Unsupported),
    }
}

macro_rules! signed_coercers {
    ($($t:ty, $target:literal => $to:ident, $to_default:ident;)*) => {
        $(
            #[doc = concat!("Coerce any value to `", stringify!($t), "`, returning `0` on failure.")]
            pub fn $to(value: &Value) -> $t {
                signed::<$t>(value).unwrap_or(0)
            }

            #[doc = concat!(
                "Like [`", stringify!($to), "`], but returns `default` for nil, unparseable ",
                "or unsupported values."
            )]
            pub fn $to_default(value: &Value, default: $t) -> $t {
                signed::<$t>(value).unwrap_or(default)
            }

            impl Coerce for $t {
                const TARGET: &'static str = $target;

                fn coerce(value: &Value) -> Result<Self, Fallback> {
                    signed(value)
                }
            }
        )*
    };
}

signed_coercers! {
    isize, "int" => to_int, to_int_with_default;
    i8, "int8" => to_int8, to_int8_with_default;
    i16, "int16" => to_int16, to_int16_with_default;
    i32, "int32" => to_int32, to_int32_with_default;
    i64, "int64" => to_int64, to_int64_with_default;
}
