//! Application state built once at startup.

use crate::config::{LoadedConfig, NodeSettings};
use chanwatch_core::ChannelContext;
use chanwatch_core::alerts::AlertSink;
use chanwatch_core::config::{ConfigStore, SettingsStore, SyncConfig};
use chanwatch_core::node::NodeApi;
use chanwatch_core::processors::Reconciler;
use std::sync::Arc;

/// Everything the daemon's tasks share.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Channel model and derived views.
    pub context: ChannelContext,
    /// Snapshot fetcher and event applier bound to `context`.
    pub reconciler: Reconciler,
    /// Balance mode source read by the views (reloaded via SIGHUP).
    pub settings: SettingsStore,
    /// Fetch and report intervals (reloaded via SIGHUP).
    pub sync_config: ConfigStore<SyncConfig>,
    /// Node settings in effect; changing them needs a restart.
    pub node: Arc<NodeSettings>,
}

impl AppState {
    pub fn new(
        config: LoadedConfig,
        node: Arc<dyn NodeApi>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let settings = SettingsStore::new(config.balance_mode);
        let context = ChannelContext::new(Arc::new(settings.clone()));
        let reconciler = Reconciler::new(context.clone(), node, alerts);
        Self {
            context,
            reconciler,
            settings,
            sync_config: ConfigStore::new(config.sync),
            node: Arc::new(config.node),
        }
    }

    /// Apply a reloaded configuration to the running system.
    pub async fn apply_reload(&self, config: LoadedConfig) {
        if config.node != *self.node {
            tracing::warn!("Node settings changed; restart the daemon to apply them");
        }
        self.settings.set_balance_mode(config.balance_mode);
        self.sync_config.update(config.sync).await;
    }
}
