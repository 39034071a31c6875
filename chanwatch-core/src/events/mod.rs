//! Channel events and the queue that carries them.
//!
//! # Event Flow
//!
//! 1. The node's event stream is decoded into [`ChannelEventUpdate`]s.
//! 2. Each update converts into a [`ChannelEvent`] and is pushed onto the
//!    channel event queue.
//! 3. The `Reconciler` drains the queue, applying one event at a time.
//!
//! [`ChannelEventUpdate`]: chanwatch_sdk::objects::ChannelEventUpdate

pub mod channels;
pub mod types;

pub use channels::{
    ChannelEventReceiver, ChannelEventSender, DEFAULT_CHANNEL_BUFFER, channel_event_channel,
};

pub use types::{ChannelEvent, ChannelKey};
