use thiserror::Error;

/// Errors surfaced by the assignment and storage layers.
///
/// Missing or malformed seed and first-session values are never errors; they
/// are treated as absent and regenerated or defaulted.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization failed: {0}")]
    Serialization(String),

    #[error("malformed experiment overrides: {0}")]
    MalformedOverrides(String),

    #[error("malformed telemetry settings: {0}")]
    MalformedSettings(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
