//! Text → number parsing used by the scalar coercers.
//!
//! Primary integer parsing is strictly base-10 at the target width. The any-base grammar
//! ([`parse_int_any_base`]) is only used as the secondary fallback of float targets.

use std::str::FromStr;

/// Parse a base-10 signed integer (optional `+`/`-`) at the width of `T`.
///
/// Out-of-range text fails rather than wrapping.
pub fn parse_signed<T: FromStr>(s: &str) -> Option<T> {
    s.parse().ok()
}

/// Parse a base-10 unsigned integer at the width of `T`. Any sign character fails.
pub fn parse_unsigned<T: FromStr>(s: &str) -> Option<T> {
    if s.starts_with(['+', '-']) {
        return None;
    }
    s.parse().ok()
}

/// Parse a decimal float (`1.5`, `-2e3`, `.5`, `inf`, `nan`, ...).
pub fn parse_float(s: &str) -> Option<f64> {
    s.parse().ok()
}

/// Parse an integer literal in any base.
///
/// Grammar: optional sign, then one of
///
/// - `0x`/`0X` hexadecimal, `0o`/`0O` octal, `0b`/`0B` binary
/// - a leading `0` followed by more digits: octal
/// - otherwise decimal
///
/// Underscores may separate digits (or follow a base prefix). The result must fit `i64`.
pub fn parse_int_any_base(s: &str) -> Option<i64> {
    let (negative, body) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };
    if body.is_empty() {
        return None;
    }

    let prefix = body.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits, prefixed) = match prefix.as_deref() {
        Some("0x") => (16, &body[2..], true),
        Some("0o") => (8, &body[2..], true),
        Some("0b") => (2, &body[2..], true),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
        _ => (10, body, false),
    };

    let magnitude = accumulate(digits, radix, prefixed)?;
    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            Some(i64::MIN)
        } else {
            i64::try_from(magnitude).ok().map(|m| -m)
        }
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn accumulate(digits: &str, radix: u32, prefixed: bool) -> Option<u64> {
    let mut magnitude: u64 = 0;
    let mut saw_digit = false;
    // An underscore may follow a digit or the base prefix, never another underscore.
    let mut underscore_ok = prefixed;
    let mut last_was_underscore = false;

    for c in digits.chars() {
        if c == '_' {
            if !underscore_ok {
                return None;
            }
            underscore_ok = false;
            last_was_underscore = true;
            continue;
        }
        let d = c.to_digit(radix)?;
        magnitude = magnitude
            .checked_mul(u64::from(radix))?
            .checked_add(u64::from(d))?;
        saw_digit = true;
        underscore_ok = true;
        last_was_underscore = false;
    }

    if !saw_digit || last_was_underscore {
        return None;
    }
    Some(magnitude)
}

/// Byte sequences are only parsed when they are valid UTF-8.
pub(crate) fn utf8(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()
}
