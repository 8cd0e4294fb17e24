use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{Result, TelemetryError};
use crate::host::ConfigurationService;
use crate::telemetry::appender::{NullAppender, TelemetryAppender};

/// Configuration section read by this crate.
pub const TELEMETRY_SECTION: &str = "telemetry";

/// The `telemetry` configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySettings {
    #[serde(default = "default_enabled")]
    pub enable_telemetry: bool,
    /// Raw experiment overrides, kept as written by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiments: Option<Value>,
}

fn default_enabled() -> bool {
    true
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            enable_telemetry: true,
            experiments: None,
        }
    }
}

impl TelemetrySettings {
    pub fn from_configuration(configuration: &dyn ConfigurationService) -> Result<Self> {
        match configuration.get_section(TELEMETRY_SECTION) {
            Some(section) if !section.is_null() => serde_json::from_value(section)
                .map_err(|e| TelemetryError::MalformedSettings(e.to_string())),
            _ => Ok(Self::default()),
        }
    }

    /// `inner` when telemetry is enabled, a sink that drops everything otherwise.
    pub fn appender(&self, inner: Rc<dyn TelemetryAppender>) -> Rc<dyn TelemetryAppender> {
        if self.enable_telemetry {
            inner
        } else {
            info!("telemetry disabled, events will be dropped");
            Rc::new(NullAppender)
        }
    }
}
