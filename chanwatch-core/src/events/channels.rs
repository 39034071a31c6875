//! Event channel factory and handles.

use super::types::ChannelEvent;
use tokio::sync::mpsc;

/// Default buffer size for the channel event queue.
///
/// Large enough to absorb a burst of activity flips after a reconnect.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for ChannelEvent events.
pub type ChannelEventSender = mpsc::Sender<ChannelEvent>;
/// Receiver handle for ChannelEvent events.
pub type ChannelEventReceiver = mpsc::Receiver<ChannelEvent>;

/// Create a new ChannelEvent channel.
///
/// The receiver is single-consumer, which is what keeps event application
/// in arrival order.
pub fn channel_event_channel() -> (ChannelEventSender, ChannelEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
