use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::host::{ConfigurationSource, Keybinding, ShutdownReason};

// Allowed: key paths, allowlisted setting values, enum names, binding shapes
// Forbidden: keybinding args, any setting value outside the allowlist

#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    UpdateConfiguration {
        source: ConfigurationSource,
        keys: Vec<String>,
    },

    UpdateConfigurationValues {
        source: ConfigurationSource,
        values: Vec<Map<String, Value>>,
    },

    Shutdown {
        reason: ShutdownReason,
    },

    UpdateKeybindings {
        bindings: Vec<KeybindingDescriptor>,
    },
}

impl TelemetryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::UpdateConfiguration { .. } => "updateConfiguration",
            TelemetryEvent::UpdateConfigurationValues { .. } => "updateConfigurationValues",
            TelemetryEvent::Shutdown { .. } => "shutdown",
            TelemetryEvent::UpdateKeybindings { .. } => "updateKeybindings",
        }
    }

    /// Payload in the shape sinks receive.
    pub fn data(&self) -> Value {
        match self {
            TelemetryEvent::UpdateConfiguration { source, keys } => json!({
                "configurationSource": source.as_str(),
                "configurationKeys": keys,
            }),
            TelemetryEvent::UpdateConfigurationValues { source, values } => json!({
                "configurationSource": source.as_str(),
                "configurationValues": values,
            }),
            TelemetryEvent::Shutdown { reason } => json!({
                "reason": reason.as_str(),
            }),
            TelemetryEvent::UpdateKeybindings { bindings } => json!({
                "bindings": bindings,
            }),
        }
    }
}

/// Keybinding as reported: the argument payload is reduced to a presence flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingDescriptor {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<bool>,
}

/// `false`, `0`, `""` and `null` count as no arguments.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<&Keybinding> for KeybindingDescriptor {
    fn from(binding: &Keybinding) -> Self {
        Self {
            key: binding.key.clone(),
            command: binding.command.clone(),
            when: binding.when.clone(),
            args: binding.args.as_ref().filter(|a| is_truthy(a)).map(|_| true), // Content STRIPPED
        }
    }
}
