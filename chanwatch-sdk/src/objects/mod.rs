pub mod balance;
pub mod channel;
pub mod event;
mod wire;

pub use balance::{BalanceMode, BalanceModeParseError};
pub use channel::{ChannelRecord, ListChannelsResponse};
pub use event::{
    ChannelEventUpdate, ChannelPoint, ChannelPointError, ChannelRef, StreamFrame,
    StreamFrameError, UpdateType,
};
