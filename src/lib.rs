pub mod error;
pub mod experiments;
pub mod host;
pub mod settings;
pub mod telemetry;

// Re-export the pieces hosts reach for most often
pub use error::{Result, TelemetryError};
pub use experiments::{load_experiments, split_random, ExperimentFlags};
pub use telemetry::relay::TelemetryRelay;
