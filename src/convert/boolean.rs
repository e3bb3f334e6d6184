//! Boolean coercion.

use crate::types::Value;

use super::parse::utf8;
use super::{Coerce, Fallback, Numeric};

/// Coerce any value to `bool`.
///
/// - numbers (and durations) are `true` iff non-zero
/// - strings and byte sequences match the literal set `"true"`/`"1"` (true) and
///   `"false"`/`"0"` (false), case-sensitively; every other text is `false`
/// - everything else is `false`
pub fn to_bool(value: &Value) -> bool {
    truthiness(value).unwrap_or(false)
}

pub(crate) fn truthiness(value: &Value) -> Result<bool, Fallback> {
    if let Some(n) = Numeric::of(value) {
        return Ok(!n.is_zero());
    }
    match value {
        Value::Utf8(s) => literal(s),
        Value::Bytes(b) => utf8(b).ok_or(Fallback::Unparseable).and_then(literal),
        v if v.is_nil() => Err(Fallback::Absent),
        _ => Err(Fallback::Unsupported),
    }
}

fn literal(s: &str) -> Result<bool, Fallback> {
    match s {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(Fallback::Unparseable),
    }
}

impl Coerce for bool {
    const TARGET: &'static str = "bool";

    fn coerce(value: &Value) -> Result<Self, Fallback> {
        truthiness(value)
    }
}
