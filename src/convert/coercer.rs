//! Configured coercion entry point.
//!
//! The free functions in [`crate::convert`] are pure and silent. A [`Coercer`] applies the
//! same rules but takes its separator and structural codec from [`CoercionOptions`], and
//! reports every fallback to an optional [`CoercionObserver`]:
//!
//! - `on_fallback` for each degraded coercion, with a severity derived from the reason
//! - `on_alert` as well when that severity is >= [`CoercionOptions::alert_at_or_above`]

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::encode::{JsonCodec, StructuralCodec};
use crate::types::Value;

use super::map::map_with;
use super::observability::{CoercionContext, CoercionObserver, CoercionSeverity};
use super::slice::{settle, string_elements};
use super::{Coerce, Fallback};

/// Options controlling a [`Coercer`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct CoercionOptions {
    /// Separator used to split text into string lists.
    pub separator: String,
    /// Codec used for structured values.
    pub codec: Arc<dyn StructuralCodec>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn CoercionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: CoercionSeverity,
}

impl fmt::Debug for CoercionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionOptions")
            .field("separator", &self.separator)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for CoercionOptions {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            codec: Arc::new(JsonCodec),
            observer: None,
            alert_at_or_above: CoercionSeverity::Critical,
        }
    }
}

/// Coerces values using a fixed set of [`CoercionOptions`].
///
/// ```rust
/// use std::sync::Arc;
///
/// use rust_data_coercion::convert::{Coercer, CoercionOptions, CoercionSeverity, StdErrObserver};
/// use rust_data_coercion::types::Value;
///
/// let coercer = Coercer::new(CoercionOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     alert_at_or_above: CoercionSeverity::Warning,
///     ..CoercionOptions::default()
/// });
///
/// // Logs `[ALERT][coerce][Warning] target=int32 source=string reason=unparseable`.
/// let n: i32 = coercer.coerce(&Value::from("abc"));
/// assert_eq!(n, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Coercer {
    options: CoercionOptions,
}

impl Coercer {
    pub fn new(options: CoercionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CoercionOptions {
        &self.options
    }

    /// Coerce into `T`, returning `T::default()` on failure.
    pub fn coerce<T: Coerce + Default>(&self, value: &Value) -> T {
        self.coerce_or(value, T::default())
    }

    /// Coerce into `T`, returning `default` on failure. Structured values are encoded with
    /// the configured codec.
    pub fn coerce_or<T: Coerce>(&self, value: &Value, default: T) -> T {
        T::coerce_with(value, self.options.codec.as_ref()).unwrap_or_else(|reason| {
            self.report(T::TARGET, value, reason);
            default
        })
    }

    /// Like [`super::to_string`], rendering structured values with the configured codec.
    pub fn string(&self, value: &Value) -> String {
        self.coerce(value)
    }

    /// Like [`super::to_string_slice_with`], with the configured separator and codec.
    pub fn string_slice(&self, value: &Value) -> Option<Vec<String>> {
        let codec = self.options.codec.as_ref();
        let result = string_elements(value, &self.options.separator, codec);
        if let Err(reason) = &result {
            self.report("[]string", value, *reason);
        }
        settle(result)
    }

    /// Like [`super::to_map`], decoding text with the configured codec.
    pub fn map(&self, value: &Value) -> HashMap<String, Value> {
        map_with(value, self.options.codec.as_ref()).unwrap_or_else(|reason| {
            self.report("map[string]any", value, reason);
            HashMap::new()
        })
    }

    fn report(&self, target: &'static str, value: &Value, reason: Fallback) {
        let Some(observer) = self.options.observer.as_ref() else {
            return;
        };
        let ctx = CoercionContext {
            target,
            source: value.kind(),
            reason,
        };
        let severity = reason.severity();
        observer.on_fallback(&ctx, severity);
        if severity >= self.options.alert_at_or_above {
            observer.on_alert(&ctx, severity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoercionResult;

    struct Bracketed;

    impl StructuralCodec for Bracketed {
        fn encode(&self, value: &Value) -> CoercionResult<String> {
            Ok(format!("<{}>", value.kind()))
        }

        fn decode_object(&self, _input: &[u8]) -> CoercionResult<Vec<(String, Value)>> {
            Ok(vec![("decoded".to_string(), Value::Bool(true))])
        }

        fn decode_array(&self, _input: &[u8]) -> CoercionResult<Vec<Value>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn default_options_match_the_free_functions() {
        let c = Coercer::default();
        assert_eq!(c.options().separator, ",");
        assert_eq!(c.string(&Value::slice([1i64])), "[1]");
        assert_eq!(
            c.string_slice(&Value::from("a,b")),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(c.coerce::<u8>(&Value::from("7")), 7);
        assert_eq!(c.coerce_or::<u8>(&Value::from("x"), 3), 3);
    }

    #[test]
    fn configured_codec_and_separator_are_used() {
        let c = Coercer::new(CoercionOptions {
            separator: ";".to_string(),
            codec: Arc::new(Bracketed),
            ..CoercionOptions::default()
        });
        assert_eq!(c.string(&Value::map([(1i64, 2i64)])), "<map>");
        assert_eq!(c.map(&Value::from("anything"))["decoded"], Value::Bool(true));
        assert_eq!(
            c.string_slice(&Value::from("a;b,c")),
            Some(vec!["a".to_string(), "b,c".to_string()])
        );
    }

    #[test]
    fn generic_and_named_string_paths_share_the_codec() {
        let c = Coercer::new(CoercionOptions {
            codec: Arc::new(Bracketed),
            ..CoercionOptions::default()
        });
        let m = Value::map([(1i64, 2i64)]);
        assert_eq!(c.coerce::<String>(&m), "<map>");
        assert_eq!(c.coerce::<String>(&m), c.string(&m));
        assert_eq!(c.coerce_or(&Value::slice([1i64]), "x".to_string()), "<slice>");
        assert_eq!(c.coerce::<i64>(&Value::from("5")), 5);
    }

    #[test]
    fn options_debug_hides_trait_objects() {
        let dbg = format!("{:?}", CoercionOptions::default());
        assert!(dbg.contains("observer_set: false"));
        assert!(dbg.contains("alert_at_or_above: Critical"));
    }
}
