//! Outbound usage telemetry.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** carry user content. Configuration values leave only
//! when their key is on [`flatten::CONFIGURATION_VALUE_ALLOWLIST`];
//! keybinding arguments are reduced to a presence flag; paths are anonymized.

pub mod anonymize;
pub mod appender;
pub mod event;
pub mod flatten;
pub mod recorder;
pub mod relay;

pub use anonymize::{anonymize, FileDescriptor};
pub use appender::{CombinedAppender, NullAppender, TelemetryAppender, TracingAppender};
pub use event::{KeybindingDescriptor, TelemetryEvent};
pub use flatten::{flatten_keys, flatten_values, CONFIGURATION_VALUE_ALLOWLIST};
pub use recorder::{RecordedEvent, TelemetryRecorder, TelemetrySnapshot};
pub use relay::{configuration_telemetry, keybindings_telemetry, lifecycle_telemetry, TelemetryRelay};
