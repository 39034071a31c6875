//! Runtime configuration shared between the daemon and the core.
//!
//! Loading and parsing happen in the daemon; these are the validated
//! values the running system reads and that a reload may swap.

mod config_store;
mod settings;
mod sync;

pub use config_store::{ConfigStore, ConfigWatcher};
pub use settings::{BalanceModeProvider, SettingsStore};
pub use sync::SyncConfig;
