//! Event type definitions.

use chanwatch_sdk::objects::{ChannelEventUpdate, ChannelPoint, ChannelRecord, UpdateType};
use compact_str::CompactString;
use std::fmt;

/// How an event names its channel.
///
/// Activity updates from the node only carry the funding outpoint, so the
/// directory resolves `Point` through its channel point index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelKey {
    Id(CompactString),
    /// `txid:index`
    Point(CompactString),
}

impl From<&str> for ChannelKey {
    fn from(id: &str) -> Self {
        ChannelKey::Id(id.into())
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKey::Id(id) => write!(f, "{id}"),
            ChannelKey::Point(point) => write!(f, "{point}"),
        }
    }
}

/// A discrete change to a single channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A channel was opened. Carries the full record.
    Open(ChannelRecord),
    /// A channel was closed and must leave the directory.
    Closed { chan_id: CompactString },
    /// The peer came online.
    Active { channel: ChannelKey },
    /// The peer went offline.
    Inactive { channel: ChannelKey },
    /// Anything this build does not understand. Applied as a no-op.
    Unknown { kind: CompactString },
}

impl ChannelEvent {
    /// Wire name of the event kind.
    pub fn kind(&self) -> &str {
        match self {
            ChannelEvent::Open(_) => "OPEN_CHANNEL",
            ChannelEvent::Closed { .. } => "CLOSED_CHANNEL",
            ChannelEvent::Active { .. } => "ACTIVE_CHANNEL",
            ChannelEvent::Inactive { .. } => "INACTIVE_CHANNEL",
            ChannelEvent::Unknown { kind } => kind.as_str(),
        }
    }

    /// Id or channel point the event refers to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            ChannelEvent::Open(record) => Some(record.chan_id.as_str()),
            ChannelEvent::Closed { chan_id } => Some(chan_id.as_str()),
            ChannelEvent::Active { channel } | ChannelEvent::Inactive { channel } => match channel {
                ChannelKey::Id(key) | ChannelKey::Point(key) => Some(key.as_str()),
            },
            ChannelEvent::Unknown { .. } => None,
        }
    }
}

fn point_key(point: ChannelPoint) -> Option<ChannelKey> {
    point
        .outpoint()
        .ok()
        .map(|outpoint| ChannelKey::Point(outpoint.into()))
}

impl From<ChannelEventUpdate> for ChannelEvent {
    /// A known kind whose payload is missing or undecodable degrades to
    /// `Unknown`.
    fn from(update: ChannelEventUpdate) -> Self {
        let kind = CompactString::from(update.update_type.as_str());
        let event = match update.update_type {
            UpdateType::OpenChannel => update.open_channel.map(ChannelEvent::Open),
            UpdateType::ClosedChannel => update
                .closed_channel
                .map(|c| ChannelEvent::Closed { chan_id: c.chan_id }),
            UpdateType::ActiveChannel => update
                .active_channel
                .and_then(point_key)
                .map(|channel| ChannelEvent::Active { channel }),
            UpdateType::InactiveChannel => update
                .inactive_channel
                .and_then(point_key)
                .map(|channel| ChannelEvent::Inactive { channel }),
            UpdateType::Other(_) => None,
        };
        event.unwrap_or(ChannelEvent::Unknown { kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanwatch_sdk::objects::ChannelRef;

    fn update(update_type: UpdateType) -> ChannelEventUpdate {
        ChannelEventUpdate {
            update_type,
            open_channel: None,
            closed_channel: None,
            active_channel: None,
            inactive_channel: None,
        }
    }

    #[test]
    fn test_convert_known_kinds() {
        let mut closed = update(UpdateType::ClosedChannel);
        closed.closed_channel = Some(ChannelRef {
            chan_id: "9".into(),
        });
        assert_eq!(
            ChannelEvent::from(closed),
            ChannelEvent::Closed {
                chan_id: "9".into()
            }
        );

        let mut inactive = update(UpdateType::InactiveChannel);
        inactive.inactive_channel = Some(ChannelPoint {
            funding_txid_bytes: Some("q80=".to_owned()),
            funding_txid_str: None,
            output_index: 1,
        });
        let event = ChannelEvent::from(inactive);
        assert_eq!(event.kind(), "INACTIVE_CHANNEL");
        assert_eq!(
            event,
            ChannelEvent::Inactive {
                channel: ChannelKey::Point("cdab:1".into())
            }
        );
        assert_eq!(event.target(), Some("cdab:1"));
    }

    #[test]
    fn test_undecodable_point_degrades_to_unknown() {
        let mut active = update(UpdateType::ActiveChannel);
        active.active_channel = Some(ChannelPoint {
            funding_txid_bytes: None,
            funding_txid_str: None,
            output_index: 0,
        });
        assert_eq!(
            ChannelEvent::from(active),
            ChannelEvent::Unknown {
                kind: "ACTIVE_CHANNEL".into()
            }
        );
    }

    #[test]
    fn test_unknown_kind_and_missing_payload() {
        let event = ChannelEvent::from(update(UpdateType::Other("PENDING_OPEN_CHANNEL".into())));
        assert_eq!(
            event,
            ChannelEvent::Unknown {
                kind: "PENDING_OPEN_CHANNEL".into()
            }
        );
        assert_eq!(event.target(), None);

        let event = ChannelEvent::from(update(UpdateType::OpenChannel));
        assert_eq!(
            event,
            ChannelEvent::Unknown {
                kind: "OPEN_CHANNEL".into()
            }
        );
    }
}
