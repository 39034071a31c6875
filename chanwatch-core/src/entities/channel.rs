//! The Channel entity.
//!
//! A `Channel` is shared by handle: the directory owns the canonical
//! `Arc`, consumers clone it, and every update is written through the same
//! allocation so holders observe mutations without re-looking it up.

use chanwatch_sdk::objects::ChannelRecord;
use compact_str::CompactString;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Stable handle to a channel owned by a [`ChannelDirectory`](crate::ChannelDirectory).
pub type ChannelHandle = Arc<Channel>;

/// Upper bound of [`Channel::local_percent`].
///
/// A fully local channel reports 99, never 100, so the routing metric
/// `max(p, 99 - p)` stays symmetric.
pub const MAX_LOCAL_PERCENT: u8 = 99;

/// The mutable part of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelState {
    pub local_balance: u64,
    pub remote_balance: u64,
    pub active: bool,
    pub uptime: time::Duration,
}

impl From<&ChannelRecord> for ChannelState {
    fn from(record: &ChannelRecord) -> Self {
        Self {
            local_balance: record.local_balance,
            remote_balance: record.remote_balance,
            active: record.active,
            uptime: record.uptime,
        }
    }
}

/// A payment channel with a peer.
#[derive(Debug)]
pub struct Channel {
    id: CompactString,
    capacity: u64,
    remote_pubkey: String,
    channel_point: String,
    state: RwLock<ChannelState>,
}

impl Channel {
    pub fn from_record(record: &ChannelRecord) -> Self {
        Self {
            id: record.chan_id.clone(),
            capacity: record.capacity,
            remote_pubkey: record.remote_pubkey.clone(),
            channel_point: record.channel_point.clone(),
            state: RwLock::new(ChannelState::from(record)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn remote_pubkey(&self) -> &str {
        &self.remote_pubkey
    }

    pub fn channel_point(&self) -> &str {
        &self.channel_point
    }

    /// Consistent copy of all mutable fields.
    pub fn state(&self) -> ChannelState {
        *self.read_state()
    }

    pub fn local_balance(&self) -> u64 {
        self.read_state().local_balance
    }

    pub fn remote_balance(&self) -> u64 {
        self.read_state().remote_balance
    }

    pub fn is_active(&self) -> bool {
        self.read_state().active
    }

    pub fn uptime(&self) -> time::Duration {
        self.read_state().uptime
    }

    /// Share of the capacity held locally, floored, in `0..=99`.
    pub fn local_percent(&self) -> u8 {
        local_percent(self.local_balance(), self.capacity)
    }

    /// Overwrite the mutable fields from a fresh record.
    ///
    /// Returns `true` if anything changed. `capacity` and the other
    /// identity fields are never touched.
    pub(crate) fn refresh(&self, record: &ChannelRecord) -> bool {
        let next = ChannelState::from(record);
        let mut state = self.write_state();
        if *state == next {
            return false;
        }
        *state = next;
        true
    }

    /// Returns `true` if the flag flipped.
    pub(crate) fn set_active(&self, active: bool) -> bool {
        let mut state = self.write_state();
        let changed = state.active != active;
        state.active = active;
        changed
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ChannelState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ChannelState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `floor(local / capacity * 100)`, clamped to [`MAX_LOCAL_PERCENT`].
pub fn local_percent(local_balance: u64, capacity: u64) -> u8 {
    if capacity == 0 {
        return 0;
    }
    let pct = u128::from(local_balance) * 100 / u128::from(capacity);
    pct.min(u128::from(MAX_LOCAL_PERCENT)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(local: u64, remote: u64, capacity: u64) -> ChannelRecord {
        ChannelRecord {
            chan_id: "42".into(),
            remote_pubkey: "02peer".to_owned(),
            channel_point: "abcd:1".to_owned(),
            capacity,
            local_balance: local,
            remote_balance: remote,
            active: true,
            uptime: time::Duration::minutes(5),
        }
    }

    #[test]
    fn test_local_percent_floors() {
        assert_eq!(local_percent(0, 1000), 0);
        assert_eq!(local_percent(999, 100_000), 0);
        assert_eq!(local_percent(1, 3), 33);
        assert_eq!(local_percent(2, 3), 66);
        assert_eq!(local_percent(500, 1000), 50);
    }

    #[test]
    fn test_local_percent_clamps_at_99() {
        assert_eq!(local_percent(1000, 1000), 99);
        assert_eq!(local_percent(995, 1000), 99);
        assert_eq!(local_percent(u64::MAX, u64::MAX), 99);
    }

    #[test]
    fn test_local_percent_zero_capacity() {
        assert_eq!(local_percent(10, 0), 0);
    }

    #[test]
    fn test_refresh_keeps_identity_fields() {
        let chan = Channel::from_record(&record(100, 900, 1000));
        assert_eq!(chan.local_percent(), 10);

        let mut next = record(700, 300, 5000);
        next.active = false;
        assert!(chan.refresh(&next));
        assert_eq!(chan.capacity(), 1000);
        assert_eq!(chan.local_balance(), 700);
        assert_eq!(chan.local_percent(), 70);
        assert!(!chan.is_active());

        assert!(!chan.refresh(&next));
    }

    #[test]
    fn test_set_active_reports_change() {
        let chan = Channel::from_record(&record(1, 1, 2));
        assert!(!chan.set_active(true));
        assert!(chan.set_active(false));
        assert!(!chan.is_active());
    }
}
