//! Derived views over the directory.
//!
//! Everything here is a pure function of the channels passed in, computed
//! on read. Memoization lives in [`ChannelContext`](crate::ChannelContext),
//! keyed on the directory version.

use crate::entities::{ChannelHandle, MAX_LOCAL_PERCENT};
use chanwatch_sdk::objects::BalanceMode;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::sync::Arc;

const SATS_PER_BTC: u64 = 100_000_000;

/// Liquidity summed over all channels, in satoshis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of remote balances: what the node can still receive.
    pub inbound: Decimal,
    /// Sum of local balances: what the node can still send.
    pub outbound: Decimal,
}

impl Totals {
    pub fn inbound_btc(&self) -> Decimal {
        self.inbound / Decimal::from(SATS_PER_BTC)
    }

    pub fn outbound_btc(&self) -> Decimal {
        self.outbound / Decimal::from(SATS_PER_BTC)
    }
}

/// Channels whose peer is currently online.
pub fn active_channels<'a>(
    channels: impl IntoIterator<Item = &'a ChannelHandle>,
) -> Vec<ChannelHandle> {
    channels
        .into_iter()
        .filter(|c| c.is_active())
        .cloned()
        .collect()
}

/// Exact inbound/outbound sums.
pub fn totals<'a>(channels: impl IntoIterator<Item = &'a ChannelHandle>) -> Totals {
    channels
        .into_iter()
        .fold(Totals::default(), |mut acc, channel| {
            let state = channel.state();
            acc.inbound += Decimal::from(state.remote_balance);
            acc.outbound += Decimal::from(state.local_balance);
            acc
        })
}

/// Distance of a channel from perfect balance: `max(p, 99 - p)`.
pub fn routing_skew(local_percent: u8) -> u8 {
    local_percent.max(MAX_LOCAL_PERCENT.saturating_sub(local_percent))
}

/// Order channels for the given balance mode.
///
/// * `Receive`: descending `local_percent`.
/// * `Send`: ascending `local_percent`.
/// * `Routing`: descending [`routing_skew`].
///
/// The sort is stable, so ties keep their input order.
pub fn sorted_channels<'a>(
    channels: impl IntoIterator<Item = &'a ChannelHandle>,
    mode: BalanceMode,
) -> Vec<ChannelHandle> {
    // snapshot the key once per channel so a concurrent refresh cannot
    // reorder mid-sort
    let keyed = channels
        .into_iter()
        .map(|c| (c.local_percent(), Arc::clone(c)));
    let sorted = match mode {
        BalanceMode::Receive => keyed.sorted_by_key(|(pct, _)| Reverse(*pct)),
        BalanceMode::Send => keyed.sorted_by_key(|(pct, _)| *pct),
        BalanceMode::Routing => keyed.sorted_by_key(|(pct, _)| Reverse(routing_skew(*pct))),
    };
    sorted.map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Channel;
    use chanwatch_sdk::objects::ChannelRecord;

    fn chan(id: &str, local: u64, capacity: u64, active: bool) -> ChannelHandle {
        Arc::new(Channel::from_record(&ChannelRecord {
            chan_id: id.into(),
            remote_pubkey: String::new(),
            channel_point: String::new(),
            capacity,
            local_balance: local,
            remote_balance: capacity - local,
            active,
            uptime: time::Duration::ZERO,
        }))
    }

    fn ids(channels: &[ChannelHandle]) -> Vec<&str> {
        channels.iter().map(|c| c.id()).collect()
    }

    #[test]
    fn test_routing_skew() {
        assert_eq!(routing_skew(0), 99);
        assert_eq!(routing_skew(99), 99);
        assert_eq!(routing_skew(49), 50);
        assert_eq!(routing_skew(50), 50);
        assert_eq!(routing_skew(30), 69);
    }

    #[test]
    fn test_sort_modes() {
        let channels = vec![
            chan("mid", 50, 100, true),
            chan("low", 10, 100, true),
            chan("high", 80, 100, true),
        ];
        assert_eq!(
            ids(&sorted_channels(&channels, BalanceMode::Receive)),
            vec!["high", "mid", "low"]
        );
        assert_eq!(
            ids(&sorted_channels(&channels, BalanceMode::Send)),
            vec!["low", "mid", "high"]
        );
        // skews: mid 50, low 89, high 80
        assert_eq!(
            ids(&sorted_channels(&channels, BalanceMode::Routing)),
            vec!["low", "high", "mid"]
        );
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let channels = vec![
            chan("a", 20, 100, true),
            chan("b", 79, 100, true),
            chan("c", 20, 100, true),
        ];
        // a and c tie everywhere; b ties them under routing (skew 79)
        assert_eq!(
            ids(&sorted_channels(&channels, BalanceMode::Receive)),
            vec!["b", "a", "c"]
        );
        assert_eq!(
            ids(&sorted_channels(&channels, BalanceMode::Routing)),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_totals_exact() {
        let channels = vec![
            chan("a", 0, 16_777_215, true),
            chan("b", 16_777_215, 16_777_215, false),
            chan("c", 1, 3, true),
        ];
        let totals = totals(&channels);
        assert_eq!(totals.outbound, Decimal::from(16_777_216u64));
        assert_eq!(totals.inbound, Decimal::from(16_777_217u64));
        assert_eq!(totals.outbound_btc(), Decimal::new(16_777_216, 8));
    }

    #[test]
    fn test_active_filter() {
        let channels = vec![chan("a", 1, 2, true), chan("b", 1, 2, false)];
        assert_eq!(ids(&active_channels(&channels)), vec!["a"]);
    }
}
