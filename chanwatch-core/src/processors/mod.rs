//! Event processors.
//!
//! - `Reconciler`: receives `ChannelEvent`s, fetches snapshots on a timer,
//!   and keeps the channel directory in step with the node.

pub mod reconciler;

pub use reconciler::Reconciler;
