#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod alerts;
pub mod config;
pub mod context;
pub mod directory;
pub mod entities;
pub mod events;
pub mod node;
pub mod processors;
pub mod utils;
pub mod views;

pub use context::ChannelContext;
pub use directory::ChannelDirectory;
pub use entities::{Channel, ChannelHandle};
