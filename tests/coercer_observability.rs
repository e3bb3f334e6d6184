use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rust_data_coercion::convert::{
    Coercer, CoercionContext, CoercionObserver, CoercionOptions, CoercionSeverity,
    CompositeObserver, FileObserver,
};
use rust_data_coercion::types::{Kind, Value};

#[derive(Default)]
struct RecordingObserver {
    fallbacks: Mutex<Vec<CoercionContext>>,
    alerts: Mutex<Vec<CoercionSeverity>>,
}

impl CoercionObserver for RecordingObserver {
    fn on_fallback(&self, ctx: &CoercionContext, _severity: CoercionSeverity) {
        self.fallbacks.lock().unwrap().push(*ctx);
    }

    fn on_alert(&self, _ctx: &CoercionContext, severity: CoercionSeverity) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn tmp_log() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("rust-data-coercion-observer-{nanos}.log"))
}

fn coercer_with(obs: Arc<RecordingObserver>, alert_at_or_above: CoercionSeverity) -> Coercer {
    Coercer::new(CoercionOptions {
        observer: Some(obs),
        alert_at_or_above,
        ..Default::default()
    })
}

#[test]
fn observer_receives_fallback_without_alert_below_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let c = coercer_with(obs.clone(), CoercionSeverity::Critical);

    // Unparseable text -> Warning, below Critical.
    assert_eq!(c.coerce::<i64>(&Value::from("abc")), 0);

    let fallbacks = obs.fallbacks.lock().unwrap().clone();
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(fallbacks[0].target, "int64");
    assert_eq!(fallbacks[0].source, Kind::Utf8);
    assert_eq!(fallbacks[0].reason.severity(), CoercionSeverity::Warning);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_alerts_at_or_above_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let c = coercer_with(obs.clone(), CoercionSeverity::Warning);

    assert_eq!(c.coerce_or::<u16>(&Value::slice([1i64]), 9), 9);
    assert_eq!(c.string(&Value::Opaque("func()".to_string())), "");
    // Nil input is Info: reported, never alerted at Warning.
    assert!(!c.coerce::<bool>(&Value::Null));

    let targets: Vec<_> = obs
        .fallbacks
        .lock()
        .unwrap()
        .iter()
        .map(|ctx| ctx.target)
        .collect();
    assert_eq!(targets, vec!["uint16", "string", "bool"]);
    assert_eq!(
        obs.alerts.lock().unwrap().clone(),
        vec![CoercionSeverity::Warning, CoercionSeverity::Error]
    );
}

#[test]
fn successful_coercions_are_silent() {
    let obs = Arc::new(RecordingObserver::default());
    let c = coercer_with(obs.clone(), CoercionSeverity::Info);

    assert_eq!(c.coerce::<f64>(&Value::from("0x10")), 16.0);
    assert_eq!(c.string(&Value::map([("k", 1i64)])), r#"{"k":1}"#);
    assert_eq!(c.map(&Value::from(r#"{"a":"b"}"#))["a"], Value::from("b"));
    assert_eq!(
        c.string_slice(&Value::slice([true, false])),
        Some(vec!["1".to_string(), "0".to_string()])
    );

    assert!(obs.fallbacks.lock().unwrap().is_empty());
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn structural_fallbacks_are_reported() {
    let obs = Arc::new(RecordingObserver::default());
    let c = coercer_with(obs.clone(), CoercionSeverity::Critical);

    assert!(c.map(&Value::from("not json")).is_empty());
    assert!(c.map(&Value::Int32(3)).is_empty());
    assert_eq!(c.string_slice(&Value::null_ptr()), None);

    let sources: Vec<_> = obs
        .fallbacks
        .lock()
        .unwrap()
        .iter()
        .map(|ctx| (ctx.target, ctx.source))
        .collect();
    assert_eq!(
        sources,
        vec![
            ("map[string]any", Kind::Utf8),
            ("map[string]any", Kind::Int32),
            ("[]string", Kind::Pointer),
        ]
    );
}

#[test]
fn file_observer_appends_lines_through_composite() {
    let path = tmp_log();
    let recording = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn CoercionObserver>> =
        vec![Arc::new(FileObserver::new(&path)), recording.clone()];
    let composite = CompositeObserver::new(observers);
    let c = Coercer::new(CoercionOptions {
        observer: Some(Arc::new(composite)),
        alert_at_or_above: CoercionSeverity::Warning,
        ..Default::default()
    });

    c.coerce::<i32>(&Value::from("x"));
    c.coerce::<i32>(&Value::Null);

    let log = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0]
        .contains("fallback severity=Warning target=int32 source=string reason=unparseable"));
    assert!(lines[1].contains("ALERT severity=Warning target=int32"));
    assert!(lines[2].contains("fallback severity=Info target=int32 source=nil reason=absent"));
    assert_eq!(recording.fallbacks.lock().unwrap().len(), 2);

    let _ = fs::remove_file(&path);
}
