//! User settings the derived views depend on.

use chanwatch_sdk::objects::BalanceMode;
use std::sync::Arc;
use tokio::sync::watch;

/// Synchronous source of the current balance mode.
pub trait BalanceModeProvider: Send + Sync {
    fn balance_mode(&self) -> BalanceMode;
}

/// A fixed mode.
impl BalanceModeProvider for BalanceMode {
    fn balance_mode(&self) -> BalanceMode {
        *self
    }
}

/// Live settings, readable without awaiting.
///
/// Clones share state. Every change is published to subscribers.
#[derive(Clone)]
pub struct SettingsStore {
    balance_mode: Arc<watch::Sender<BalanceMode>>,
}

impl SettingsStore {
    pub fn new(balance_mode: BalanceMode) -> Self {
        let (tx, _) = watch::channel(balance_mode);
        Self {
            balance_mode: Arc::new(tx),
        }
    }

    pub fn set_balance_mode(&self, mode: BalanceMode) {
        let previous = self.balance_mode.send_replace(mode);
        if previous != mode {
            tracing::debug!(from = %previous, to = %mode, "Balance mode changed");
        }
    }

    pub fn subscribe_balance_mode(&self) -> watch::Receiver<BalanceMode> {
        self.balance_mode.subscribe()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(BalanceMode::default())
    }
}

impl BalanceModeProvider for SettingsStore {
    fn balance_mode(&self) -> BalanceMode {
        *self.balance_mode.borrow()
    }
}
