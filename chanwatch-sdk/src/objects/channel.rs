//! Channel records as returned by `GET /v1/channels`.

use super::wire::{duration_secs, u64_string};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A single channel as reported by the node.
///
/// Amounts are in satoshis. Fields the gateway omits (proto3 drops zero
/// values) fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Short channel id, the stable key of a channel.
    pub chan_id: CompactString,
    #[serde(default)]
    pub remote_pubkey: String,
    /// `txid:output_index` of the funding output.
    #[serde(default)]
    pub channel_point: String,
    #[serde(with = "u64_string", default)]
    pub capacity: u64,
    #[serde(with = "u64_string", default)]
    pub local_balance: u64,
    #[serde(with = "u64_string", default)]
    pub remote_balance: u64,
    #[serde(default)]
    pub active: bool,
    /// How long the peer has been online while the channel was monitored.
    #[serde(with = "duration_secs", default = "zero_duration")]
    pub uptime: time::Duration,
}

fn zero_duration() -> time::Duration {
    time::Duration::ZERO
}

/// Response body of `GET /v1/channels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListChannelsResponse {
    #[serde(default)]
    pub channels: Vec<ChannelRecord>,
}
