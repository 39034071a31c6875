//! Shared types for talking to a Lightning node's REST gateway.
//!
//! [`objects`] holds the JSON shapes of `ListChannels` and
//! `SubscribeChannelEvents`. The HTTP client in [`client`] is gated behind
//! the `client` cargo feature so the reconciler core never links `reqwest`.

pub mod objects;

#[cfg(feature = "client")]
pub mod client;
