//! The Node API seam.
//!
//! The core never talks to the network. It asks a [`NodeApi`]
//! implementation for snapshots and leaves transport, encoding and timeouts
//! to that implementation.

use async_trait::async_trait;
use chanwatch_sdk::objects::ChannelRecord;
use thiserror::Error;

/// Errors a Node API client can report.
///
/// The display text of `Transport` is the bare message so it can be
/// relayed to the alert sink untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeApiError {
    /// Request never produced a usable response.
    #[error("{0}")]
    Transport(String),

    /// Response arrived but could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The node is up but refuses to serve the call (e.g. still syncing).
    #[error("node unavailable")]
    Unavailable,
}

/// Source of full channel snapshots.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Fetch every open channel the node currently knows about.
    async fn list_channels(&self) -> Result<Vec<ChannelRecord>, NodeApiError>;
}
