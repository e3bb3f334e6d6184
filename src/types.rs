//! Core data model for coercion.
//!
//! Every coercer in this crate takes a [`Value`]: a closed set of source shapes covering
//! scalars, byte sequences, durations, errors and structured (map/slice/array/struct/pointer)
//! values. Matching on [`Value`] replaces runtime type switches; the compiler checks that
//! every coercer handles every shape.

use std::fmt;

/// Field-less discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Duration,
    Utf8,
    Bytes,
    Error,
    Map,
    Slice,
    Array,
    Struct,
    Pointer,
    Opaque,
}

impl Kind {
    /// Conventional short type name (`int64`, `string`, `[]byte`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "nil",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Duration => "duration",
            Kind::Utf8 => "string",
            Kind::Bytes => "[]byte",
            Kind::Error => "error",
            Kind::Map => "map",
            Kind::Slice => "slice",
            Kind::Array => "array",
            Kind::Struct => "struct",
            Kind::Pointer => "ptr",
            Kind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A signed span of time with nanosecond resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    const MICROSECOND: i64 = 1_000;
    const MILLISECOND: i64 = 1_000_000;
    const SECOND: i64 = 1_000_000_000;

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn from_micros(micros: i64) -> Self {
        Self(micros.saturating_mul(Self::MICROSECOND))
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(Self::MILLISECOND))
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(Self::SECOND))
    }

    pub const fn from_mins(mins: i64) -> Self {
        Self::from_secs(mins.saturating_mul(60))
    }

    pub const fn from_hours(hours: i64) -> Self {
        Self::from_secs(hours.saturating_mul(3600))
    }

    /// Total length in nanoseconds.
    pub const fn as_nanos(self) -> i64 {
        self.0
    }
}

impl From<std::time::Duration> for Duration {
    fn from(d: std::time::Duration) -> Self {
        Self(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }
}

/// Writes the fractional part of `v` (the lowest `prec` decimal digits) with trailing zeros
/// omitted, returning the remaining integer part.
fn split_frac(v: u64, prec: u32) -> (String, u64) {
    let mut digits = Vec::with_capacity(prec as usize + 1);
    let mut v = v;
    let mut printed = false;
    for _ in 0..prec {
        let digit = (v % 10) as u8;
        printed = printed || digit != 0;
        if printed {
            digits.push(b'0' + digit);
        }
        v /= 10;
    }
    if printed {
        digits.push(b'.');
    }
    digits.reverse();
    (String::from_utf8(digits).unwrap_or_default(), v)
}

/// Renders the unit breakdown, e.g. `1h30m45s`, `1.5s`, `250ms`, `100ns`.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0s");
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        let u = self.0.unsigned_abs();

        if u < Self::SECOND as u64 {
            return if u < Self::MICROSECOND as u64 {
                write!(f, "{sign}{u}ns")
            } else if u < Self::MILLISECOND as u64 {
                let (frac, whole) = split_frac(u, 3);
                write!(f, "{sign}{whole}{frac}µs")
            } else {
                let (frac, whole) = split_frac(u, 6);
                write!(f, "{sign}{whole}{frac}ms")
            };
        }

        let (frac, secs) = split_frac(u, 9);
        let mins = secs / 60;
        let s = secs % 60;
        if mins == 0 {
            return write!(f, "{sign}{s}{frac}s");
        }
        let hours = mins / 60;
        let m = mins % 60;
        if hours == 0 {
            write!(f, "{sign}{m}m{s}{frac}s")
        } else {
            write!(f, "{sign}{hours}h{m}m{s}{frac}s")
        }
    }
}

/// A named struct value: a type name plus its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Struct type name; elements of one sequence are expected to share it.
    pub type_name: String,
    /// Ordered `(name, value)` pairs.
    pub fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field (builder style).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Returns the value of a field by name, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// A dynamically-typed source value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    Bool(bool),
    /// Native-width signed integer.
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    /// Native-width unsigned integer.
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Duration(Duration),
    /// UTF-8 string.
    Utf8(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// An error value, carried by its message.
    Error(String),
    /// Key/value pairs with keys of any shape. Iteration order carries no meaning.
    Map(Vec<(Value, Value)>),
    /// Growable sequence.
    Slice(Vec<Value>),
    /// Fixed-size sequence.
    Array(Vec<Value>),
    Struct(Record),
    /// Pointer to a value; `None` is a nil pointer.
    Pointer(Option<Box<Value>>),
    /// A value with no representation here (function, channel, ...), by type name.
    Opaque(String),
}

impl Value {
    /// Returns the shape of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Int8(_) => Kind::Int8,
            Value::Int16(_) => Kind::Int16,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::Uint(_) => Kind::Uint,
            Value::Uint8(_) => Kind::Uint8,
            Value::Uint16(_) => Kind::Uint16,
            Value::Uint32(_) => Kind::Uint32,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::Duration(_) => Kind::Duration,
            Value::Utf8(_) => Kind::Utf8,
            Value::Bytes(_) => Kind::Bytes,
            Value::Error(_) => Kind::Error,
            Value::Map(_) => Kind::Map,
            Value::Slice(_) => Kind::Slice,
            Value::Array(_) => Kind::Array,
            Value::Struct(_) => Kind::Struct,
            Value::Pointer(_) => Kind::Pointer,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    /// `true` for `Null` and for a nil pointer.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Null | Value::Pointer(None))
    }

    /// Build a slice from any iterator of convertible items.
    pub fn slice<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Slice(items.into_iter().map(Into::into).collect())
    }

    /// Build a fixed-size array from any iterator of convertible items.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build a map from `(key, value)` pairs.
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Pointer to `value`.
    pub fn ptr(value: impl Into<Value>) -> Self {
        Value::Pointer(Some(Box::new(value.into())))
    }

    /// A nil pointer.
    pub fn null_ptr() -> Self {
        Value::Pointer(None)
    }

    /// Follows non-nil pointers until a non-pointer value (or a nil pointer) is reached.
    pub fn deref_pointers(&self) -> &Value {
        let mut current = self;
        while let Value::Pointer(Some(inner)) = current {
            current = inner;
        }
        current
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    usize => Uint,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Duration => Duration,
    String => Utf8,
    Vec<u8> => Bytes,
    Record => Struct,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_owned())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<std::time::Duration> for Value {
    fn from(v: std::time::Duration) -> Self {
        Value::Duration(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{Duration, Kind, Record, Value};

    #[test]
    fn duration_display_uses_unit_breakdown() {
        let cases = [
            (Duration::from_nanos(0), "0s"),
            (Duration::from_nanos(100), "100ns"),
            (Duration::from_nanos(1_500), "1.5µs"),
            (Duration::from_micros(1_500), "1.5ms"),
            (Duration::from_millis(1_500), "1.5s"),
            (Duration::from_secs(60), "1m0s"),
            (Duration::from_secs(3600), "1h0m0s"),
            (
                Duration::from_secs(3600 + 30 * 60 + 45),
                "1h30m45s",
            ),
            (Duration::from_millis(-2_250), "-2.25s"),
        ];
        for (d, expected) in cases {
            assert_eq!(d.to_string(), expected, "nanos={}", d.as_nanos());
        }
    }

    #[test]
    fn duration_from_std_saturates() {
        let huge = std::time::Duration::from_secs(u64::MAX);
        assert_eq!(Duration::from(huge).as_nanos(), i64::MAX);
        let small = std::time::Duration::from_millis(3);
        assert_eq!(Duration::from(small), Duration::from_millis(3));
    }

    #[test]
    fn deref_pointers_follows_chains_and_stops_at_nil() {
        let v = Value::ptr(Value::ptr(Value::Int64(7)));
        assert_eq!(v.deref_pointers(), &Value::Int64(7));

        let nil = Value::ptr(Value::null_ptr());
        assert_eq!(nil.deref_pointers(), &Value::Pointer(None));
        assert!(nil.deref_pointers().is_nil());
    }

    #[test]
    fn record_lookup_by_name() {
        let r = Record::new("User")
            .with_field("id", 1i64)
            .with_field("name", "ada");
        assert_eq!(r.get("name"), Some(&Value::Utf8("ada".to_string())));
        assert_eq!(r.get("missing"), None);
        assert_eq!(r.field_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(Value::from(r).kind(), Kind::Struct);
    }

    #[test]
    fn kind_names_follow_conventional_type_names() {
        assert_eq!(Value::from("x").kind().to_string(), "string");
        assert_eq!(Value::from(vec![1u8]).kind().to_string(), "[]byte");
        assert_eq!(Value::null_ptr().kind().to_string(), "ptr");
    }
}
