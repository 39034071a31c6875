//! Periodic liquidity report in the log.

use chanwatch_core::ChannelContext;
use chanwatch_core::config::{ConfigStore, ConfigWatcher, SyncConfig};
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::info;

/// Ids listed in each report.
const TOP_CHANNELS: usize = 5;

pub async fn run_reporter(
    context: ChannelContext,
    config_store: ConfigStore<SyncConfig>,
    mut config_watcher: ConfigWatcher,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut timer = report_timer(config_store.snapshot().await);

    loop {
        tokio::select! {
            biased;

            res = shutdown_rx.changed() => {
                if res.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }

            Ok(()) = config_watcher.changed() => {
                timer = report_timer(config_store.snapshot().await);
            }

            _ = timer.tick() => log_report(&context),
        }
    }
}

/// First report one period after start, once a snapshot has had time to land.
fn report_timer(config: SyncConfig) -> Interval {
    let period = config.report_interval;
    let mut timer = tokio::time::interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

fn log_report(context: &ChannelContext) {
    let totals = context.totals();
    let sorted = context.sorted_channels();
    let top: Vec<&str> = sorted.iter().take(TOP_CHANNELS).map(|c| c.id()).collect();

    info!(
        channels = context.len(),
        active = context.active_channels().len(),
        inbound_btc = %totals.inbound_btc(),
        outbound_btc = %totals.outbound_btc(),
        mode = %context.balance_mode(),
        top = %top.join(", "),
        "Channel liquidity report"
    );
}
