use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::emitter::{Emitter, Subscription};

/// Where a configuration change originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigurationSource {
    Default,
    User,
    Workspace,
}

impl ConfigurationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigurationSource::Default => "Default",
            ConfigurationSource::User => "User",
            ConfigurationSource::Workspace => "Workspace",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationChangeEvent {
    pub source: ConfigurationSource,
    /// The full configuration contributed by `source`, as a nested object.
    pub source_config: Value,
}

/// Read and watch access to the host configuration.
pub trait ConfigurationService {
    /// Value at a dotted section path, e.g. `telemetry` or `editor.fontSize`.
    fn get_section(&self, section: &str) -> Option<Value>;

    fn on_did_update_configuration(
        &self,
        listener: Box<dyn FnMut(&ConfigurationChangeEvent)>,
    ) -> Subscription;
}

/// Walk a dotted path through nested objects. Anything that is not an object
/// along the way ends the walk with `None`.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Configuration kept in memory as one layer per source. Reads see the
/// layers composed as default < user < workspace.
pub struct InMemoryConfiguration {
    defaults: RefCell<Value>,
    user: RefCell<Value>,
    workspace: RefCell<Value>,
    changes: Emitter<ConfigurationChangeEvent>,
}

impl InMemoryConfiguration {
    pub fn new() -> Self {
        Self::with_values(Value::Object(Map::new()))
    }

    /// Start with `values` as the user layer.
    pub fn with_values(values: Value) -> Self {
        Self {
            defaults: RefCell::new(Value::Object(Map::new())),
            user: RefCell::new(values),
            workspace: RefCell::new(Value::Object(Map::new())),
            changes: Emitter::new(),
        }
    }

    /// Merge `source_config` into the layer of `source` and notify listeners.
    pub fn update(&self, source: ConfigurationSource, source_config: Value) {
        merge_into(&mut self.layer(source).borrow_mut(), &source_config);
        self.changes.fire(&ConfigurationChangeEvent {
            source,
            source_config,
        });
    }

    fn layer(&self, source: ConfigurationSource) -> &RefCell<Value> {
        match source {
            ConfigurationSource::Default => &self.defaults,
            ConfigurationSource::User => &self.user,
            ConfigurationSource::Workspace => &self.workspace,
        }
    }

    fn effective(&self) -> Value {
        let mut value = self.defaults.borrow().clone();
        merge_into(&mut value, &self.user.borrow());
        merge_into(&mut value, &self.workspace.borrow());
        value
    }
}

impl Default for InMemoryConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationService for InMemoryConfiguration {
    fn get_section(&self, section: &str) -> Option<Value> {
        lookup(&self.effective(), section).cloned()
    }

    fn on_did_update_configuration(
        &self,
        listener: Box<dyn FnMut(&ConfigurationChangeEvent)>,
    ) -> Subscription {
        self.changes.subscribe(listener)
    }
}

fn merge_into(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_into(existing, value)
                    }
                    _ => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}
