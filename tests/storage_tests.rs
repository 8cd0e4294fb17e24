use std::rc::Rc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tempfile::tempdir;

use telemetry_relay::experiments::{load_experiments, RANDOMNESS_KEY};
use telemetry_relay::host::{FileStorage, InMemoryConfiguration, StorageService, Workspace};
use telemetry_relay::settings::TelemetrySettings;
use telemetry_relay::telemetry::{TelemetryAppender, TelemetryRecorder};
use telemetry_relay::TelemetryError;

#[test]
fn test_file_storage_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let first = {
        let storage = FileStorage::open(path.clone()).unwrap();
        load_experiments(
            &storage,
            &InMemoryConfiguration::new(),
            &Workspace::empty(),
            Utc::now(),
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap()
    };

    let reopened = FileStorage::open(path.clone()).unwrap();
    assert!(reopened.get(RANDOMNESS_KEY).is_some(), "Seed should be on disk");

    let second = load_experiments(
        &reopened,
        &InMemoryConfiguration::new(),
        &Workspace::empty(),
        Utc::now(),
        &mut StdRng::seed_from_u64(4),
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_corrupt_storage_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "[1, 2").unwrap();

    assert!(matches!(
        FileStorage::open(path),
        Err(TelemetryError::Serialization(_))
    ));
}

#[test]
fn test_settings_from_configuration() {
    let configuration = InMemoryConfiguration::new();
    assert_eq!(
        TelemetrySettings::from_configuration(&configuration).unwrap(),
        TelemetrySettings::default()
    );

    let configuration = InMemoryConfiguration::with_values(json!({
        "telemetry": { "enableTelemetry": false, "experiments": { "mergeQuickLinks": true } }
    }));
    let settings = TelemetrySettings::from_configuration(&configuration).unwrap();
    assert!(!settings.enable_telemetry);
    assert_eq!(settings.experiments, Some(json!({ "mergeQuickLinks": true })));

    let configuration = InMemoryConfiguration::with_values(json!({
        "telemetry": { "enableTelemetry": "sometimes" }
    }));
    assert!(matches!(
        TelemetrySettings::from_configuration(&configuration),
        Err(TelemetryError::MalformedSettings(_))
    ));
}

#[test]
fn test_disabled_telemetry_drops_events() {
    let recorder = Rc::new(TelemetryRecorder::new());
    let inner: Rc<dyn TelemetryAppender> = recorder.clone();

    let disabled = TelemetrySettings {
        enable_telemetry: false,
        experiments: None,
    };
    disabled.appender(inner.clone()).log("shutdown", &json!({"reason": "QUIT"}));
    assert!(recorder.is_empty());

    TelemetrySettings::default()
        .appender(inner)
        .log("shutdown", &json!({"reason": "QUIT"}));
    assert_eq!(recorder.len(), 1);
}
