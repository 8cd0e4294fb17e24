use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::emitter::{Emitter, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeybindingSource {
    Default,
    User,
}

/// One user keybinding entry as the host reads it from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keybinding {
    pub key: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// Arbitrary user payload. Never leaves this process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeybindingsChangeEvent {
    pub source: KeybindingSource,
    pub keybindings: Vec<Keybinding>,
}

pub trait KeybindingService {
    fn on_did_update_keybindings(
        &self,
        listener: Box<dyn FnMut(&KeybindingsChangeEvent)>,
    ) -> Subscription;
}

#[derive(Default)]
pub struct InMemoryKeybindings {
    updates: Emitter<KeybindingsChangeEvent>,
}

impl InMemoryKeybindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, source: KeybindingSource, keybindings: Vec<Keybinding>) {
        self.updates.fire(&KeybindingsChangeEvent {
            source,
            keybindings,
        });
    }
}

impl KeybindingService for InMemoryKeybindings {
    fn on_did_update_keybindings(
        &self,
        listener: Box<dyn FnMut(&KeybindingsChangeEvent)>,
    ) -> Subscription {
        self.updates.subscribe(listener)
    }
}
