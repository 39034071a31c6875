use std::time::Duration;

/// Maximum doubling steps (2^6 = 64 seconds, capped to 60).
const MAX_BACKOFF_STEPS: u32 = 6;

/// Longest wait between two stream reconnect attempts.
pub const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

/// Delay before reconnect attempt number `attempt` (0-based).
///
/// Uses exponential backoff: 2^attempt seconds, capped at one minute.
pub fn reconnect_delay(attempt: u32) -> Duration {
    let seconds = 2u64.pow(attempt.min(MAX_BACKOFF_STEPS));
    Duration::from_secs(seconds).min(MAX_RECONNECT_DELAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconnect_delay_calculation() {
        assert_eq!(reconnect_delay(0), Duration::from_secs(1));
        assert_eq!(reconnect_delay(1), Duration::from_secs(2));
        assert_eq!(reconnect_delay(5), Duration::from_secs(32));
        // Capped at a minute
        assert_eq!(reconnect_delay(6), Duration::from_secs(60));
        assert_eq!(reconnect_delay(100), Duration::from_secs(60));
    }
}
