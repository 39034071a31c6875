//! Forwards the node's channel event stream into the reconciler queue.
//!
//! The subscription is re-opened with exponential backoff whenever it ends
//! or fails. The backoff resets once a session has delivered events.

use crate::shutdown::shutdown_requested;
use chanwatch_core::events::{ChannelEvent, ChannelEventSender};
use chanwatch_core::utils::reconnect::reconnect_delay;
use chanwatch_sdk::client::{ClientError, NodeClient};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Run until shutdown or until the reconciler queue is gone.
pub async fn forward_channel_events(
    client: NodeClient,
    event_tx: ChannelEventSender,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut attempt = 0u32;

    loop {
        let mut forwarded = 0u64;
        tokio::select! {
            biased;

            _ = shutdown_requested(&mut shutdown_rx) => break,

            result = pump(&client, &event_tx, &mut forwarded) => match result {
                Ok(()) => info!(forwarded, "Channel event stream ended"),
                Err(e) => warn!(forwarded, error = %e, "Channel event stream failed"),
            },
        }

        if event_tx.is_closed() {
            info!("Channel event queue closed, stopping stream forwarder");
            break;
        }

        if forwarded > 0 {
            attempt = 0;
        }
        let delay = reconnect_delay(attempt);
        attempt = attempt.saturating_add(1);
        debug!(?delay, attempt, "Reconnecting channel event stream");

        tokio::select! {
            biased;
            _ = shutdown_requested(&mut shutdown_rx) => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    info!("Channel event forwarder shutdown complete");
}

/// One subscription session.
async fn pump(
    client: &NodeClient,
    event_tx: &ChannelEventSender,
    forwarded: &mut u64,
) -> Result<(), ClientError> {
    let mut stream = client.subscribe_channel_events().await?;
    info!(node = %client.base_url(), "Subscribed to channel events");

    while let Some(update) = stream.next_update().await? {
        let event = ChannelEvent::from(update);
        debug!(kind = event.kind(), "Received channel event");
        if event_tx.send(event).await.is_err() {
            return Ok(());
        }
        *forwarded += 1;
    }
    Ok(())
}
