use std::rc::Rc;

use tracing::debug;

use super::appender::TelemetryAppender;
use super::event::{KeybindingDescriptor, TelemetryEvent};
use super::flatten::{flatten_keys, flatten_values, CONFIGURATION_VALUE_ALLOWLIST};
use crate::host::{
    ConfigurationChangeEvent, ConfigurationService, ConfigurationSource, KeybindingService,
    KeybindingSource, KeybindingsChangeEvent, LifecycleService, ShutdownReason, Subscription,
};

fn publish(appender: &dyn TelemetryAppender, event: &TelemetryEvent) {
    appender.log(event.name(), &event.data());
}

/// Events describing a configuration change. Defaults changing underneath
/// the user are not reported.
pub fn configuration_events(change: &ConfigurationChangeEvent) -> Vec<TelemetryEvent> {
    if change.source == ConfigurationSource::Default {
        return Vec::new();
    }
    vec![
        TelemetryEvent::UpdateConfiguration {
            source: change.source,
            keys: flatten_keys(&change.source_config),
        },
        TelemetryEvent::UpdateConfigurationValues {
            source: change.source,
            values: flatten_values(&change.source_config, CONFIGURATION_VALUE_ALLOWLIST),
        },
    ]
}

/// Event describing a user keybinding change, if it is worth reporting.
pub fn keybindings_event(change: &KeybindingsChangeEvent) -> Option<TelemetryEvent> {
    if change.source != KeybindingSource::User || change.keybindings.is_empty() {
        return None;
    }
    Some(TelemetryEvent::UpdateKeybindings {
        bindings: change
            .keybindings
            .iter()
            .map(KeybindingDescriptor::from)
            .collect(),
    })
}

pub fn configuration_telemetry(
    appender: Rc<dyn TelemetryAppender>,
    configuration: &dyn ConfigurationService,
) -> Subscription {
    configuration.on_did_update_configuration(Box::new(move |change: &ConfigurationChangeEvent| {
        let events = configuration_events(change);
        if events.is_empty() {
            debug!(source = change.source.as_str(), "configuration change not reported");
        }
        for event in &events {
            publish(appender.as_ref(), event);
        }
    }))
}

pub fn lifecycle_telemetry(
    appender: Rc<dyn TelemetryAppender>,
    lifecycle: &dyn LifecycleService,
) -> Subscription {
    lifecycle.on_shutdown(Box::new(move |reason: &ShutdownReason| {
        publish(appender.as_ref(), &TelemetryEvent::Shutdown { reason: *reason });
    }))
}

pub fn keybindings_telemetry(
    appender: Rc<dyn TelemetryAppender>,
    keybindings: &dyn KeybindingService,
) -> Subscription {
    keybindings.on_did_update_keybindings(Box::new(move |change: &KeybindingsChangeEvent| {
        match keybindings_event(change) {
            Some(event) => publish(appender.as_ref(), &event),
            None => debug!(
                bindings = change.keybindings.len(),
                "keybinding change not reported"
            ),
        }
    }))
}

/// The three relay subscriptions, released together.
#[must_use = "dropping the relay unsubscribes every handler"]
#[derive(Debug)]
pub struct TelemetryRelay {
    subscriptions: Vec<Subscription>,
}

impl TelemetryRelay {
    pub fn start(
        appender: Rc<dyn TelemetryAppender>,
        configuration: &dyn ConfigurationService,
        lifecycle: &dyn LifecycleService,
        keybindings: &dyn KeybindingService,
    ) -> Self {
        let subscriptions = vec![
            configuration_telemetry(Rc::clone(&appender), configuration),
            lifecycle_telemetry(Rc::clone(&appender), lifecycle),
            keybindings_telemetry(appender, keybindings),
        ];
        debug!(handlers = subscriptions.len(), "telemetry relay started");
        Self { subscriptions }
    }

    pub fn dispose(self) {
        for subscription in self.subscriptions {
            subscription.dispose();
        }
    }
}
