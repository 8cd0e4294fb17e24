use std::rc::Rc;

use serde_json::Value;
use tracing::info;

/// Append-only sink for outbound telemetry.
pub trait TelemetryAppender {
    fn log(&self, event_name: &str, data: &Value);
}

impl<A: TelemetryAppender + ?Sized> TelemetryAppender for Rc<A> {
    fn log(&self, event_name: &str, data: &Value) {
        (**self).log(event_name, data)
    }
}

/// Used when telemetry is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAppender;

impl TelemetryAppender for NullAppender {
    fn log(&self, _event_name: &str, _data: &Value) {}
}

/// Fans each call out to every appender, in registration order.
pub struct CombinedAppender {
    appenders: Vec<Rc<dyn TelemetryAppender>>,
}

impl CombinedAppender {
    pub fn new(appenders: Vec<Rc<dyn TelemetryAppender>>) -> Self {
        Self { appenders }
    }
}

impl TelemetryAppender for CombinedAppender {
    fn log(&self, event_name: &str, data: &Value) {
        for appender in &self.appenders {
            appender.log(event_name, data);
        }
    }
}

/// Writes every event to `tracing` under the `telemetry` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAppender;

impl TelemetryAppender for TracingAppender {
    fn log(&self, event_name: &str, data: &Value) {
        info!(target: "telemetry", event = event_name, data = %data);
    }
}
