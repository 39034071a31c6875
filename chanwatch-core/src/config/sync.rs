use std::time::Duration;

/// Timing of the periodic work around the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// How often a full snapshot is fetched.
    pub fetch_interval: Duration,
    /// How often the daemon logs a liquidity report.
    pub report_interval: Duration,
}

impl SyncConfig {
    /// Intervals never go below one second; `tokio::time::interval`
    /// rejects a zero period.
    pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new(fetch_interval: Duration, report_interval: Duration) -> Self {
        Self {
            fetch_interval: fetch_interval.max(Self::MIN_INTERVAL),
            report_interval: report_interval.max(Self::MIN_INTERVAL),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(60), Duration::from_secs(300))
    }
}
