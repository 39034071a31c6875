//! Scenario: the node cannot be reached.

mod common;

use chanwatch_core::node::NodeApiError;
use chanwatch_sdk::objects::BalanceMode;
use common::{FakeNode, harness, sample_channels};

#[tokio::test]
async fn failed_first_fetch_alerts_once_and_leaves_directory_empty() {
    let h = harness(FakeNode::failing("test-err"), BalanceMode::Receive);
    assert!(h.alerts.is_empty());

    h.reconciler.fetch_channels().await;

    let alerts = h.alerts.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, "test-err");
    assert_eq!(h.context.len(), 0);
}

#[tokio::test]
async fn failed_refetch_keeps_previous_snapshot() {
    let channels = sample_channels();
    let node = FakeNode::with_channels(channels.clone());
    let h = harness(node.clone(), BalanceMode::Receive);
    h.reconciler.fetch_channels().await;
    let version = h.context.directory().version();

    node.respond_with(Err(NodeApiError::Malformed("unexpected eof".to_owned())));
    h.reconciler.fetch_channels().await;
    h.reconciler.fetch_channels().await;

    assert_eq!(h.context.len(), channels.len());
    assert_eq!(h.context.directory().version(), version);
    let alerts = h.alerts.alerts();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[1].message, "malformed response: unexpected eof");
}
