use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::Kind;

use super::Fallback;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CoercionSeverity {
    /// Nil input degraded to the zero value or default.
    Info,
    /// Input did not parse or has no conversion to the target.
    Warning,
    /// A structured value could not be encoded.
    Error,
    /// Reserved for callers that escalate fallbacks; never produced by the coercers.
    Critical,
}

/// What fell back: the target, the input shape and the reason.
///
/// Displays as `target=int32 source=string reason=unparseable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoercionContext {
    /// Target type name (`int64`, `string`, `map[string]any`, ...).
    pub target: &'static str,
    /// Shape of the input value.
    pub source: Kind,
    /// Why the value degraded.
    pub reason: Fallback,
}

impl fmt::Display for CoercionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "target={} source={} reason={}",
            self.target, self.source, self.reason
        )
    }
}

/// Receives the fallbacks of a [`super::Coercer`].
///
/// Each degraded value is reported once through `on_fallback`. Reasons whose severity
/// reaches the coercer's alert threshold are also reported through `on_alert`, e.g. to page
/// on unencodable payloads while only logging absent fields.
pub trait CoercionObserver: Send + Sync {
    fn on_fallback(&self, _ctx: &CoercionContext, _severity: CoercionSeverity) {}

    /// Forwards to [`Self::on_fallback`] unless overridden.
    fn on_alert(&self, ctx: &CoercionContext, severity: CoercionSeverity) {
        self.on_fallback(ctx, severity)
    }
}

/// Reports every fallback to each inner observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CoercionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn CoercionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl CoercionObserver for CompositeObserver {
    fn on_fallback(&self, ctx: &CoercionContext, severity: CoercionSeverity) {
        for o in &self.observers {
            o.on_fallback(ctx, severity);
        }
    }

    fn on_alert(&self, ctx: &CoercionContext, severity: CoercionSeverity) {
        for o in &self.observers {
            o.on_alert(ctx, severity);
        }
    }
}

/// Logs coercion fallbacks to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl CoercionObserver for StdErrObserver {
    fn on_fallback(&self, ctx: &CoercionContext, severity: CoercionSeverity) {
        eprintln!("[coerce][{severity:?}] {ctx}");
    }

    fn on_alert(&self, ctx: &CoercionContext, severity: CoercionSeverity) {
        eprintln!("[ALERT][coerce][{severity:?}] {ctx}");
    }
}

/// Appends one line per fallback to a log file:
/// `<unix secs> fallback severity=Warning target=int32 source=string reason=unparseable`
/// (`ALERT` instead of `fallback` for alerts).
///
/// Logging never fails the coercion: open and write errors are dropped.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn record(&self, label: &str, ctx: &CoercionContext, severity: CoercionSeverity) {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let _guard = self.lock.lock().ok();
        let file = OpenOptions::new().create(true).append(true).open(&self.path);
        if let Ok(mut file) = file {
            let _ = writeln!(file, "{secs} {label} severity={severity:?} {ctx}");
        }
    }
}

impl CoercionObserver for FileObserver {
    fn on_fallback(&self, ctx: &CoercionContext, severity: CoercionSeverity) {
        self.record("fallback", ctx, severity);
    }

    fn on_alert(&self, ctx: &CoercionContext, severity: CoercionSeverity) {
        self.record("ALERT", ctx, severity);
    }
}
