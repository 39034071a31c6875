//! Channel event stream frames (`GET /v1/channels/subscribe`).
//!
//! The gateway streams one JSON object per line, each wrapping either a
//! [`ChannelEventUpdate`] in `result` or a terminal `error`.

use super::channel::ChannelRecord;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Kind of a channel event update.
///
/// Unknown kinds are preserved verbatim in [`UpdateType::Other`] so newer
/// node versions never break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UpdateType {
    OpenChannel,
    ClosedChannel,
    ActiveChannel,
    InactiveChannel,
    Other(String),
}

impl UpdateType {
    pub fn as_str(&self) -> &str {
        match self {
            UpdateType::OpenChannel => "OPEN_CHANNEL",
            UpdateType::ClosedChannel => "CLOSED_CHANNEL",
            UpdateType::ActiveChannel => "ACTIVE_CHANNEL",
            UpdateType::InactiveChannel => "INACTIVE_CHANNEL",
            UpdateType::Other(kind) => kind.as_str(),
        }
    }
}

impl From<String> for UpdateType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OPEN_CHANNEL" => UpdateType::OpenChannel,
            "CLOSED_CHANNEL" => UpdateType::ClosedChannel,
            "ACTIVE_CHANNEL" => UpdateType::ActiveChannel,
            "INACTIVE_CHANNEL" => UpdateType::InactiveChannel,
            _ => UpdateType::Other(value),
        }
    }
}

impl From<UpdateType> for String {
    fn from(value: UpdateType) -> Self {
        match value {
            UpdateType::Other(kind) => kind,
            known => known.as_str().to_owned(),
        }
    }
}

/// Reference to a closed channel. The node sends a full close summary;
/// only the id is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub chan_id: CompactString,
}

/// Funding outpoint of a channel, as carried by activity events.
///
/// The txid arrives either as base64 bytes in internal byte order or as
/// the usual reversed hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_txid_bytes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_txid_str: Option<String>,
    #[serde(default)]
    pub output_index: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ChannelPointError {
    #[error("channel point has no funding txid")]
    MissingTxid,
    #[error("invalid funding txid bytes: {0}")]
    InvalidTxidBytes(#[from] base64::DecodeError),
}

impl ChannelPoint {
    /// `txid:index`, the form `channel_point` takes in channel listings.
    pub fn outpoint(&self) -> Result<String, ChannelPointError> {
        let txid = match (&self.funding_txid_str, &self.funding_txid_bytes) {
            (Some(txid), _) => txid.clone(),
            (None, Some(encoded)) => {
                let mut raw = STANDARD.decode(encoded)?;
                raw.reverse();
                hex::encode(raw)
            }
            (None, None) => return Err(ChannelPointError::MissingTxid),
        };
        Ok(format!("{txid}:{}", self.output_index))
    }
}

/// One channel event as emitted by the node.
///
/// Exactly one of the payload fields is expected to be set, matching
/// [`update_type`](Self::update_type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEventUpdate {
    #[serde(rename = "type")]
    pub update_type: UpdateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_channel: Option<ChannelRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_channel: Option<ChannelRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_channel: Option<ChannelPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive_channel: Option<ChannelPoint>,
}

/// Error object the gateway sends before terminating a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFrameError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Envelope of a single line in a server-streaming response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFrame<T> {
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StreamFrameError>,
}
