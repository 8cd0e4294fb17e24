use std::rc::{Rc, Weak};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::flags::{ExperimentFlags, ExperimentOverrides, DEFAULT_EXPERIMENTS};
use super::split::BucketSplitter;
use crate::error::{Result, TelemetryError};
use crate::host::{
    ConfigurationChangeEvent, ConfigurationService, StorageService, Subscription, WorkspaceContext,
};

pub const RANDOMNESS_KEY: &str = "experiments.randomness";
pub const OVERRIDES_KEY: &str = "experiments.overrides";
pub const FIRST_SESSION_DATE_KEY: &str = "telemetry.firstSessionDate";

/// Configuration section holding user/admin overrides.
pub const EXPERIMENTS_SECTION: &str = "telemetry.experiments";

const NEW_USER_WINDOW_HOURS: i64 = 24;

/// Compute the current experiment flags.
///
/// Order of precedence, lowest first: seed-derived values, forced defaults
/// for returning users or open workspaces, stored overrides.
pub fn load_experiments<R: Rng + ?Sized>(
    storage: &dyn StorageService,
    configuration: &dyn ConfigurationService,
    workspace: &dyn WorkspaceContext,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<ExperimentFlags> {
    sync_overrides(storage, configuration)?;

    let seed = experiments_randomness(storage, rng)?;
    let mut flags = derive_flags(seed);

    if !is_new_user(storage, now) || workspace.has_workspace() {
        flags.show_new_user_watermark = DEFAULT_EXPERIMENTS.show_new_user_watermark;
        flags.open_untitled_file = DEFAULT_EXPERIMENTS.open_untitled_file;
    }

    let overrides = stored_overrides(storage)?;
    Ok(flags.with_overrides(&overrides))
}

/// Seed-only assignment. Consumes the seed in a fixed order:
/// watermark, untitled file, quick links, welcome page.
pub fn derive_flags(seed: f64) -> ExperimentFlags {
    let mut splitter = BucketSplitter::new(seed);
    let show_new_user_watermark = splitter.next_decision();
    let open_untitled_file = splitter.next_decision();
    let merge_quick_links = splitter.next_decision();
    let enable_welcome_page = splitter.next_decision();

    ExperimentFlags {
        show_new_user_watermark,
        open_untitled_file,
        enable_welcome_page,
        merge_quick_links,
    }
}

/// Read the installation seed, creating and persisting it on first use.
pub fn experiments_randomness<R: Rng + ?Sized>(
    storage: &dyn StorageService,
    rng: &mut R,
) -> Result<f64> {
    if let Some(seed) = storage.get(RANDOMNESS_KEY).as_deref().and_then(parse_seed) {
        return Ok(seed);
    }

    let seed: f64 = rng.gen();
    storage.store(RANDOMNESS_KEY, &seed.to_string())?;
    debug!(seed, "created experiment seed");
    Ok(seed)
}

fn parse_seed(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|seed| (0.0..1.0).contains(seed))
}

/// An installation is new until 24 hours after its first session. A missing
/// or unreadable first-session date counts as new.
pub fn is_new_user(storage: &dyn StorageService, now: DateTime<Utc>) -> bool {
    match storage
        .get(FIRST_SESSION_DATE_KEY)
        .as_deref()
        .and_then(parse_session_date)
    {
        Some(first) => now.signed_duration_since(first) < Duration::hours(NEW_USER_WINDOW_HOURS),
        None => true,
    }
}

fn parse_session_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Overrides as last written to storage. Absent means none.
pub fn stored_overrides(storage: &dyn StorageService) -> Result<ExperimentOverrides> {
    let raw = stored_overrides_value(storage)?;
    serde_json::from_value(raw).map_err(|e| TelemetryError::MalformedOverrides(e.to_string()))
}

fn stored_overrides_value(storage: &dyn StorageService) -> Result<Value> {
    match storage.get(OVERRIDES_KEY) {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| TelemetryError::MalformedOverrides(e.to_string())),
        None => Ok(Value::Object(Map::new())),
    }
}

/// Copy `telemetry.experiments` into storage when it differs from the stored
/// copy. Returns whether a write happened.
pub fn sync_overrides(
    storage: &dyn StorageService,
    configuration: &dyn ConfigurationService,
) -> Result<bool> {
    let stored = stored_overrides_value(storage)?;
    let live = configuration
        .get_section(EXPERIMENTS_SECTION)
        .filter(|v| !v.is_null())
        .unwrap_or_else(|| Value::Object(Map::new()));

    if stored == live {
        return Ok(false);
    }

    storage.store(OVERRIDES_KEY, &live.to_string())?;
    info!(overrides = %live, "experiment overrides refreshed from configuration");
    Ok(true)
}

/// Keep stored overrides in step with configuration for as long as the
/// returned handle lives.
pub fn watch_experiment_overrides(
    storage: Rc<dyn StorageService>,
    configuration: Rc<dyn ConfigurationService>,
) -> Subscription {
    let weak_configuration: Weak<dyn ConfigurationService> = Rc::downgrade(&configuration);
    configuration.on_did_update_configuration(Box::new(move |_event: &ConfigurationChangeEvent| {
        let Some(configuration) = weak_configuration.upgrade() else {
            return;
        };
        if let Err(e) = sync_overrides(storage.as_ref(), configuration.as_ref()) {
            warn!(error = %e, "failed to refresh experiment overrides");
        }
    }))
}

/// Welcome page decision without the new-user adjustments: a stored override
/// if there is one, otherwise the seed-derived value.
pub fn is_welcome_page_enabled<R: Rng + ?Sized>(
    storage: &dyn StorageService,
    rng: &mut R,
) -> Result<bool> {
    if let Some(enabled) = stored_overrides(storage)?.enable_welcome_page {
        return Ok(enabled);
    }
    let seed = experiments_randomness(storage, rng)?;
    Ok(derive_flags(seed).enable_welcome_page)
}
