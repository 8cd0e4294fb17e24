use serde::{Deserialize, Serialize};

use super::emitter::{Emitter, Subscription};

/// Why the window or application is going away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShutdownReason {
    /// Window closed.
    Close,
    /// Application quit.
    Quit,
    /// Window reloaded.
    Reload,
    /// Another workspace loaded into the window.
    Load,
}

impl ShutdownReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShutdownReason::Close => "CLOSE",
            ShutdownReason::Quit => "QUIT",
            ShutdownReason::Reload => "RELOAD",
            ShutdownReason::Load => "LOAD",
        }
    }
}

pub trait LifecycleService {
    fn on_shutdown(&self, listener: Box<dyn FnMut(&ShutdownReason)>) -> Subscription;
}

#[derive(Default)]
pub struct InMemoryLifecycle {
    shutdowns: Emitter<ShutdownReason>,
}

impl InMemoryLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutdown(&self, reason: ShutdownReason) {
        self.shutdowns.fire(&reason);
    }
}

impl LifecycleService for InMemoryLifecycle {
    fn on_shutdown(&self, listener: Box<dyn FnMut(&ShutdownReason)>) -> Subscription {
        self.shutdowns.subscribe(listener)
    }
}
