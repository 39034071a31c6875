//! Scenario: snapshots fetched into the directory.

mod common;

use chanwatch_sdk::objects::BalanceMode;
use common::{FakeNode, harness, record, sample_channels};
use std::sync::Arc;

#[tokio::test]
async fn fetch_into_empty_directory_inserts_every_id() {
    let channels = sample_channels();
    let h = harness(FakeNode::with_channels(channels.clone()), BalanceMode::Receive);

    assert_eq!(h.context.len(), 0);
    h.reconciler.fetch_channels().await;
    assert_eq!(h.context.len(), channels.len());
    assert!(h.alerts.is_empty());
}

#[tokio::test]
async fn refetch_preserves_identity_and_refreshes_fields() {
    let node = FakeNode::with_channels(sample_channels());
    let h = harness(node.clone(), BalanceMode::Receive);
    h.reconciler.fetch_channels().await;

    let held = h.context.sorted_channels()[0].clone();
    let id = held.id().to_owned();
    let before: Vec<_> = h
        .context
        .directory()
        .iter()
        .cloned()
        .collect();

    // same snapshot, but the held channel's uptime and balances moved
    let mut next = sample_channels();
    let moved = next.iter_mut().find(|r| r.chan_id.as_str() == id).unwrap();
    moved.uptime = time::Duration::seconds(123);
    moved.local_balance /= 2;
    moved.remote_balance = moved.capacity - moved.local_balance;
    let expected = moved.clone();
    node.respond_with(Ok(next));
    h.reconciler.fetch_channels().await;

    let after = h.context.get(&id).unwrap();
    assert!(Arc::ptr_eq(&held, &after));
    assert_eq!(held.uptime(), time::Duration::seconds(123));
    assert_eq!(held.local_balance(), expected.local_balance);
    assert_eq!(held.remote_balance(), expected.remote_balance);

    for chan in &before {
        let current = h.context.get(chan.id()).unwrap();
        assert!(Arc::ptr_eq(chan, &current), "channel {} was replaced", chan.id());
    }
}

#[tokio::test]
async fn unchanged_refetch_keeps_values() {
    let channels = sample_channels();
    let h = harness(FakeNode::with_channels(channels.clone()), BalanceMode::Send);
    h.reconciler.fetch_channels().await;
    let version = h.context.directory().version();

    h.reconciler.fetch_channels().await;
    assert_eq!(h.context.directory().version(), version);
    for record in &channels {
        let chan = h.context.get(&record.chan_id).unwrap();
        assert_eq!(chan.local_balance(), record.local_balance);
        assert_eq!(chan.remote_balance(), record.remote_balance);
        assert_eq!(chan.is_active(), record.active);
        assert_eq!(chan.uptime(), record.uptime);
    }
}

#[tokio::test]
async fn channels_missing_from_later_snapshot_are_kept() {
    let node = FakeNode::with_channels(vec![
        record("1", 100, 50, 50, true),
        record("2", 100, 50, 50, true),
    ]);
    let h = harness(node.clone(), BalanceMode::Receive);
    h.reconciler.fetch_channels().await;

    node.respond_with(Ok(vec![record("2", 100, 10, 90, true)]));
    h.reconciler.fetch_channels().await;

    assert_eq!(h.context.len(), 2);
    assert!(h.context.get("1").is_some());
    assert_eq!(h.context.get("2").unwrap().local_balance(), 10);
}
