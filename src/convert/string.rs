//! String coercion.
//!
//! | source | rendering |
//! |---|---|
//! | bool | `"1"` / `"0"` |
//! | integers | base-10 with sign |
//! | `float64` | integral: no fraction digits; otherwise 6 fixed fraction digits |
//! | `float32` | integral: no fraction digits; otherwise 15 fixed fraction digits |
//! | duration | unit breakdown (`1h30m45s`) |
//! | string / error | text / message |
//! | bytes | UTF-8 decode (invalid sequences replaced) |
//! | nil | `""` |
//! | anything else | structural encoding, `""` if it cannot be encoded |

use crate::encode::{JsonCodec, StructuralCodec};
use crate::types::Value;

use super::{Coerce, Fallback};

/// Coerce any value to a `String`.
///
/// ```rust
/// use rust_data_coercion::convert::to_string;
/// use rust_data_coercion::types::Value;
///
/// assert_eq!(to_string(&Value::Bool(true)), "1");
/// assert_eq!(to_string(&Value::Float64(100.0)), "100");
/// assert_eq!(to_string(&Value::slice([1i64, 2])), "[1,2]");
/// ```
pub fn to_string(value: &Value) -> String {
    render(value, &JsonCodec).unwrap_or_default()
}

/// Like [`to_string`], but produces bytes; byte sequences pass through unchanged.
pub fn to_bytes(value: &Value) -> Vec<u8> {
    match value {
        Value::Bytes(b) => b.clone(),
        other => to_string(other).into_bytes(),
    }
}

pub(crate) fn render(value: &Value, codec: &dyn StructuralCodec) -> Result<String, Fallback> {
    let out = match value {
        Value::Null => String::new(),
        Value::Bool(v) => if *v { "1" } else { "0" }.to_owned(),
        Value::Int(v) => v.to_string(),
        Value::Int8(v) => v.to_string(),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Uint(v) => v.to_string(),
        Value::Uint8(v) => v.to_string(),
        Value::Uint16(v) => v.to_string(),
        Value::Uint32(v) => v.to_string(),
        Value::Uint64(v) => v.to_string(),
        Value::Float32(v) => format_float(f64::from(*v), 15),
        Value::Float64(v) => format_float(*v, 6),
        Value::Duration(d) => d.to_string(),
        Value::Utf8(s) | Value::Error(s) => s.clone(),
        Value::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
        other => codec.encode(other).map_err(|_| Fallback::Unencodable)?,
    };
    Ok(out)
}

/// Integral values print without a fraction; others with exactly `digits` fraction digits.
fn format_float(v: f64, digits: usize) -> String {
    if v.is_nan() {
        "NaN".to_owned()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf" } else { "-Inf" }.to_owned()
    } else if v.floor() == v {
        format!("{v:.0}")
    } else {
        format!("{v:.digits$}")
    }
}

impl Coerce for String {
    const TARGET: &'static str = "string";

    fn coerce(value: &Value) -> Result<Self, Fallback> {
        render(value, &JsonCodec)
    }

    fn coerce_with(value: &Value, codec: &dyn StructuralCodec) -> Result<Self, Fallback> {
        render(value, codec)
    }
}

#[cfg(test)]
mod tests {
    use super::{render, to_bytes, to_string};
    use crate::convert::Fallback;
    use crate::encode::JsonCodec;
    use crate::types::{Duration, Record, Value};

    #[test]
    fn scalars_render_canonically() {
        assert_eq!(to_string(&Value::Bool(true)), "1");
        assert_eq!(to_string(&Value::Bool(false)), "0");
        assert_eq!(to_string(&Value::Int8(-8)), "-8");
        assert_eq!(to_string(&Value::Uint64(u64::MAX)), "18446744073709551615");
        assert_eq!(to_string(&Value::Null), "");
        assert_eq!(to_string(&Value::Error("boom".to_string())), "boom");
        assert_eq!(to_string(&Value::from(b"hi".as_slice())), "hi");
    }

    #[test]
    fn float64_uses_six_fraction_digits_unless_integral() {
        assert_eq!(to_string(&Value::Float64(100.0)), "100");
        assert_eq!(to_string(&Value::Float64(3.14159)), "3.141590");
        assert_eq!(to_string(&Value::Float64(-0.5)), "-0.500000");
        assert_eq!(to_string(&Value::Float64(1e21)), "1000000000000000000000");
        assert_eq!(to_string(&Value::Float64(f64::INFINITY)), "+Inf");
        assert_eq!(to_string(&Value::Float64(f64::NAN)), "NaN");
    }

    #[test]
    fn float32_uses_fifteen_fraction_digits_unless_integral() {
        assert_eq!(to_string(&Value::Float32(2.0)), "2");
        assert_eq!(to_string(&Value::Float32(0.5)), "0.500000000000000");
        assert_eq!(to_string(&Value::Float32(2.2)), "2.200000047683716");
    }

    #[test]
    fn durations_render_unit_breakdown() {
        let d = Duration::from_secs(3600 + 30 * 60 + 45);
        assert_eq!(to_string(&Value::Duration(d)), "1h30m45s");
    }

    #[test]
    fn structured_values_use_the_codec() {
        let r = Record::new("User").with_field("name", "ada");
        assert_eq!(to_string(&r.into()), r#"{"name":"ada"}"#);
        assert_eq!(to_string(&Value::null_ptr()), "null");
        assert_eq!(to_string(&Value::Opaque("func()".into())), "");
        assert_eq!(
            render(&Value::Opaque("func()".into()), &JsonCodec),
            Err(Fallback::Unencodable)
        );
    }

    #[test]
    fn bytes_pass_through_to_bytes() {
        assert_eq!(to_bytes(&Value::Bytes(vec![0xff, 0x00])), vec![0xff, 0x00]);
        assert_eq!(to_bytes(&Value::Int32(12)), b"12".to_vec());
        assert!(to_bytes(&Value::Null).is_empty());
    }
}
