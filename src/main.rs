use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use telemetry_relay::experiments::{
    load_experiments, watch_experiment_overrides, FIRST_SESSION_DATE_KEY,
};
use telemetry_relay::host::{
    ConfigurationService, FileStorage, InMemoryConfiguration, InMemoryKeybindings,
    InMemoryLifecycle, ShutdownReason, StorageService, Workspace,
};
use telemetry_relay::settings::TelemetrySettings;
use telemetry_relay::telemetry::{
    CombinedAppender, TelemetryAppender, TelemetryRecorder, TelemetryRelay, TracingAppender,
};

const USAGE: &str = "usage: telemetry-relay [STORAGE_JSON] [SETTINGS_JSON] [WORKSPACE_FOLDER]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let storage_path = match args.next() {
        Some(arg) if arg == "-h" || arg == "--help" => {
            println!("{USAGE}");
            return Ok(());
        }
        Some(arg) => PathBuf::from(arg),
        None => PathBuf::from("telemetry-storage.json"),
    };
    let settings_path = args.next().map(PathBuf::from);
    let workspace = args.next().map(Workspace::open).unwrap_or_default();

    let storage: Rc<dyn StorageService> = Rc::new(
        FileStorage::open(storage_path.clone())
            .with_context(|| format!("opening storage {}", storage_path.display()))?,
    );
    // The host owns the first-session date; stamp it on the first run.
    if storage.get(FIRST_SESSION_DATE_KEY).is_none() {
        storage.store(FIRST_SESSION_DATE_KEY, &Utc::now().to_rfc3339())?;
    }

    let values: Value = match &settings_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading settings {}", path.display()))?;
            serde_json::from_str(&raw).context("settings must be a JSON object")?
        }
        None => json!({}),
    };
    let configuration = Rc::new(InMemoryConfiguration::with_values(values));
    let settings = TelemetrySettings::from_configuration(configuration.as_ref())?;

    let flags = load_experiments(
        storage.as_ref(),
        configuration.as_ref(),
        &workspace,
        Utc::now(),
        &mut rand::thread_rng(),
    )?;
    println!("{}", serde_json::to_string_pretty(&flags)?);

    let recorder = Rc::new(TelemetryRecorder::new());
    let sinks: Vec<Rc<dyn TelemetryAppender>> = vec![
        Rc::new(TracingAppender),
        Rc::clone(&recorder) as Rc<dyn TelemetryAppender>,
    ];
    let appender = settings.appender(Rc::new(CombinedAppender::new(sinks)));

    let lifecycle = InMemoryLifecycle::new();
    let keybindings = InMemoryKeybindings::new();
    let shared_configuration: Rc<dyn ConfigurationService> = configuration.clone();
    let overrides = watch_experiment_overrides(Rc::clone(&storage), shared_configuration);
    let relay = TelemetryRelay::start(appender, configuration.as_ref(), &lifecycle, &keybindings);

    lifecycle.shutdown(ShutdownReason::Quit);

    relay.dispose();
    overrides.dispose();
    info!(events = recorder.len(), "session closed");
    Ok(())
}
