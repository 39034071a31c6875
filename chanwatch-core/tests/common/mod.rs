#![allow(dead_code)]

use async_trait::async_trait;
use chanwatch_core::alerts::AlertLog;
use chanwatch_core::node::{NodeApi, NodeApiError};
use chanwatch_core::processors::Reconciler;
use chanwatch_core::ChannelContext;
use chanwatch_sdk::objects::{BalanceMode, ChannelRecord};
use std::sync::{Arc, Mutex};

pub fn record(id: &str, capacity: u64, local: u64, remote: u64, active: bool) -> ChannelRecord {
    ChannelRecord {
        chan_id: id.into(),
        remote_pubkey: format!("02{id:0>64}"),
        channel_point: format!("{id:0>64}:0"),
        capacity,
        local_balance: local,
        remote_balance: remote,
        active,
        uptime: time::Duration::seconds(3600),
    }
}

/// A mixed snapshot: empty, full, balanced and in-between channels, all
/// active.
pub fn sample_channels() -> Vec<ChannelRecord> {
    let mut channels = vec![
        record("100000000000001", 1_000_000, 0, 1_000_000, true),
        record("100000000000002", 1_000_000, 1_000_000, 0, true),
        record("100000000000003", 1_000_000, 999_999, 1, true),
        record("100000000000004", 2_000_000, 1_000_000, 990_000, true),
        record("100000000000005", 16_777_215, 8_388_607, 8_388_608, true),
        record("100000000000006", 3, 1, 2, true),
    ];
    for i in 0..18u64 {
        let capacity = 500_000 + i * 137_911;
        let local = capacity * ((i * 37) % 100) / 100;
        let remote = capacity - local;
        channels.push(record(
            &format!("2000000000000{i:02}"),
            capacity,
            local,
            remote,
            true,
        ));
    }
    channels
}

/// Node API fake whose next answer can be swapped between calls.
pub struct FakeNode {
    response: Mutex<Result<Vec<ChannelRecord>, NodeApiError>>,
}

impl FakeNode {
    pub fn with_channels(channels: Vec<ChannelRecord>) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Ok(channels)),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Err(NodeApiError::Transport(message.to_owned()))),
        })
    }

    pub fn respond_with(&self, response: Result<Vec<ChannelRecord>, NodeApiError>) {
        *self.response.lock().unwrap() = response;
    }
}

#[async_trait]
impl NodeApi for FakeNode {
    async fn list_channels(&self) -> Result<Vec<ChannelRecord>, NodeApiError> {
        self.response.lock().unwrap().clone()
    }
}

pub struct Harness {
    pub context: ChannelContext,
    pub reconciler: Reconciler,
    pub alerts: Arc<AlertLog>,
}

pub fn harness(node: Arc<dyn NodeApi>, mode: BalanceMode) -> Harness {
    let context = ChannelContext::new(Arc::new(mode));
    let alerts = Arc::new(AlertLog::new());
    let reconciler = Reconciler::new(context.clone(), node, alerts.clone());
    Harness {
        context,
        reconciler,
        alerts,
    }
}
