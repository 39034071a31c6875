//! Reconciler processor.
//!
//! The Reconciler is responsible for:
//! - Fetching full channel snapshots from the [`NodeApi`] and merging them
//! - Applying `ChannelEvent`s from the event queue, one at a time, in order
//! - Relaying fetch failures to the [`AlertSink`]
//! - Re-arming the fetch timer when the sync config changes
//!
//! A fetch never holds the directory lock while waiting on the node, so
//! events keep flowing during a slow fetch. Overlapping fetches are
//! allowed and every completed one is merged, regardless of which was
//! issued first.

use crate::alerts::AlertSink;
use crate::config::{ConfigStore, ConfigWatcher, SyncConfig};
use crate::context::ChannelContext;
use crate::directory::EventOutcome;
use crate::events::{ChannelEvent, ChannelEventReceiver};
use crate::node::NodeApi;
use kanau::processor::Processor;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Keeps a [`ChannelContext`] reconciled with the node.
///
/// Cheap to clone; clones share the context and collaborators.
#[derive(Clone)]
pub struct Reconciler {
    context: ChannelContext,
    node: Arc<dyn NodeApi>,
    alerts: Arc<dyn AlertSink>,
}

impl Reconciler {
    pub fn new(
        context: ChannelContext,
        node: Arc<dyn NodeApi>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            context,
            node,
            alerts,
        }
    }

    pub fn context(&self) -> &ChannelContext {
        &self.context
    }

    /// Fetch a snapshot and merge it.
    ///
    /// Never fails: on error the directory is left untouched and the error
    /// message is pushed to the alert sink exactly once.
    pub async fn fetch_channels(&self) {
        debug!("Fetching channel snapshot");
        match self.node.list_channels().await {
            Ok(records) => {
                let summary = self.context.merge_snapshot(&records);
                debug!(
                    received = records.len(),
                    inserted = summary.inserted,
                    updated = summary.updated,
                    unchanged = summary.unchanged,
                    "Merged channel snapshot"
                );
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch channels");
                self.alerts.push(e.to_string());
            }
        }
    }

    /// Apply one event under the directory write lock.
    pub fn apply_event(&self, event: ChannelEvent) -> EventOutcome {
        let outcome = self.context.directory_mut().apply_event(&event);
        match outcome {
            EventOutcome::Ignored => {
                debug!(kind = event.kind(), "Ignoring channel event of unknown kind");
            }
            _ => {
                debug!(
                    kind = event.kind(),
                    target = event.target().unwrap_or_default(),
                    ?outcome,
                    "Applied channel event"
                );
            }
        }
        outcome
    }

    /// Run until shutdown is signaled.
    ///
    /// This method:
    /// 1. Fetches a snapshot immediately, then every `fetch_interval`
    /// 2. Applies queued events as they arrive
    /// 3. Re-arms the fetch timer when the sync config changes
    /// 4. Aborts outstanding fetches on shutdown
    pub async fn run(
        self,
        mut shutdown_rx: watch::Receiver<bool>,
        mut event_rx: ChannelEventReceiver,
        config_store: ConfigStore<SyncConfig>,
        mut config_watcher: ConfigWatcher,
    ) {
        let mut fetch_timer = fetch_timer(&config_store).await;
        let mut in_flight: JoinSet<()> = JoinSet::new();
        info!(channels = self.context.len(), "Reconciler started");

        loop {
            tokio::select! {
                biased;

                // Shutdown has highest priority.
                res = shutdown_rx.changed() => {
                    if res.is_err() || *shutdown_rx.borrow() {
                        info!("Reconciler received shutdown signal");
                        break;
                    }
                }

                Ok(()) = config_watcher.changed() => {
                    fetch_timer = fetch_timer_from(config_store.snapshot().await);
                    info!(
                        fetch_interval = ?fetch_timer.period(),
                        "Sync config changed, fetch timer re-armed"
                    );
                }

                Some(event) = event_rx.recv() => {
                    self.apply_event(event);
                }

                _ = fetch_timer.tick() => {
                    let this = self.clone();
                    in_flight.spawn(async move { this.fetch_channels().await });
                }

                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "Channel fetch task failed");
                    }
                }
            }
        }

        in_flight.abort_all();
        info!("Reconciler shutdown complete");
    }
}

async fn fetch_timer(config_store: &ConfigStore<SyncConfig>) -> Interval {
    fetch_timer_from(config_store.snapshot().await)
}

fn fetch_timer_from(config: SyncConfig) -> Interval {
    let period = config.fetch_interval.max(SyncConfig::MIN_INTERVAL);
    let mut timer = tokio::time::interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

// ---------------------------------------------------------------------------
// Processor trait implementation
// ---------------------------------------------------------------------------

impl Processor<ChannelEvent> for Reconciler {
    type Output = ();
    type Error = Infallible;

    async fn process(&self, event: ChannelEvent) -> Result<(), Infallible> {
        self.apply_event(event);
        Ok(())
    }
}
