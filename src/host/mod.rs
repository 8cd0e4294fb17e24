//! Narrow contracts for the host services this crate consumes.
//!
//! The host owns configuration, storage, workspace, lifecycle and keybinding
//! state. This crate only reads, writes single keys, and subscribes. The
//! in-memory implementations exist for embedding and tests.

pub mod configuration;
pub mod emitter;
pub mod keybindings;
pub mod lifecycle;
pub mod storage;
pub mod workspace;

pub use configuration::{
    ConfigurationChangeEvent, ConfigurationService, ConfigurationSource, InMemoryConfiguration,
};
pub use emitter::{Emitter, Subscription};
pub use keybindings::{
    InMemoryKeybindings, Keybinding, KeybindingService, KeybindingSource, KeybindingsChangeEvent,
};
pub use lifecycle::{InMemoryLifecycle, LifecycleService, ShutdownReason};
pub use storage::{FileStorage, InMemoryStorage, StorageService};
pub use workspace::{Workspace, WorkspaceContext};
