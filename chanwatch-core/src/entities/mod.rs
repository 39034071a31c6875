pub mod channel;

pub use channel::{Channel, ChannelHandle, ChannelState, MAX_LOCAL_PERCENT};
