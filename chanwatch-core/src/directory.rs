//! The Channel Directory.
//!
//! Maps channel ids to [`ChannelHandle`]s and owns their lifetime. An id
//! maps to the same allocation for as long as the channel exists: snapshot
//! merges and open events write through the existing handle instead of
//! replacing it. A channel only leaves the directory on a close event.
//! Being absent from a later snapshot does not remove it.
//!
//! Channels are also indexed by funding outpoint, which is how the node
//! names them in activity events.

use crate::entities::{Channel, ChannelHandle};
use crate::events::{ChannelEvent, ChannelKey};
use chanwatch_sdk::objects::ChannelRecord;
use compact_str::CompactString;
use std::collections::BTreeMap;
use std::sync::Arc;

/// What happened to a single record on upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
    Unchanged,
}

/// Counters for one snapshot merge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Result of applying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Inserted,
    Updated,
    Removed,
    ActivityChanged,
    /// The event referred to a channel that is not in the directory, or
    /// changed nothing.
    NoOp,
    /// Unrecognized kind, dropped.
    Ignored,
}

#[derive(Debug, Default)]
pub struct ChannelDirectory {
    channels: BTreeMap<CompactString, ChannelHandle>,
    /// channel point -> id
    points: BTreeMap<CompactString, CompactString>,
    version: u64,
}

impl ChannelDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.channels.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<ChannelHandle> {
        self.channels.get(id).cloned()
    }

    /// Look a channel up by its `txid:index` funding outpoint.
    pub fn get_by_point(&self, point: &str) -> Option<ChannelHandle> {
        self.get(self.points.get(point)?)
    }

    /// Id of the channel `key` names, if it is in the directory.
    pub fn resolve<'a>(&'a self, key: &'a ChannelKey) -> Option<&'a str> {
        match key {
            ChannelKey::Id(id) => self.channels.contains_key(id.as_str()).then_some(id.as_str()),
            ChannelKey::Point(point) => self.points.get(point.as_str()).map(CompactString::as_str),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(CompactString::as_str)
    }

    /// Iterate in directory order (ascending id).
    pub fn iter(&self) -> impl Iterator<Item = &ChannelHandle> {
        self.channels.values()
    }

    /// Mutation counter. Bumped whenever any channel or the key set changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Merge a full snapshot.
    ///
    /// Known ids are refreshed in place; new ids are inserted; ids missing
    /// from `records` are left alone.
    pub fn merge_snapshot(&mut self, records: &[ChannelRecord]) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for record in records {
            match self.upsert(record) {
                Upsert::Inserted => summary.inserted += 1,
                Upsert::Updated => summary.updated += 1,
                Upsert::Unchanged => summary.unchanged += 1,
            }
        }
        summary
    }

    /// Insert a new channel or refresh the existing one with the same id.
    pub fn upsert(&mut self, record: &ChannelRecord) -> Upsert {
        let outcome = match self.channels.get(record.chan_id.as_str()) {
            Some(existing) if existing.refresh(record) => Upsert::Updated,
            Some(_) => Upsert::Unchanged,
            None => {
                let channel = Arc::new(Channel::from_record(record));
                if !record.channel_point.is_empty() {
                    self.points
                        .insert(record.channel_point.as_str().into(), record.chan_id.clone());
                }
                self.channels.insert(record.chan_id.clone(), channel);
                Upsert::Inserted
            }
        };
        if outcome != Upsert::Unchanged {
            self.bump();
        }
        outcome
    }

    pub fn remove(&mut self, id: &str) -> Option<ChannelHandle> {
        let removed = self.channels.remove(id)?;
        if self.points.get(removed.channel_point()).is_some_and(|owner| owner.as_str() == id) {
            self.points.remove(removed.channel_point());
        }
        self.bump();
        Some(removed)
    }

    /// Flip the activity flag. Returns `None` if the id is unknown,
    /// otherwise whether the flag changed.
    pub fn set_active(&mut self, id: &str, active: bool) -> Option<bool> {
        let changed = self.channels.get(id)?.set_active(active);
        if changed {
            self.bump();
        }
        Some(changed)
    }

    /// Apply one discrete event.
    pub fn apply_event(&mut self, event: &ChannelEvent) -> EventOutcome {
        match event {
            ChannelEvent::Open(record) => match self.upsert(record) {
                Upsert::Inserted => EventOutcome::Inserted,
                Upsert::Updated => EventOutcome::Updated,
                Upsert::Unchanged => EventOutcome::NoOp,
            },
            ChannelEvent::Closed { chan_id } => match self.remove(chan_id) {
                Some(_) => EventOutcome::Removed,
                None => EventOutcome::NoOp,
            },
            ChannelEvent::Active { channel } => self.activity_outcome(channel, true),
            ChannelEvent::Inactive { channel } => self.activity_outcome(channel, false),
            ChannelEvent::Unknown { .. } => EventOutcome::Ignored,
        }
    }

    fn activity_outcome(&mut self, key: &ChannelKey, active: bool) -> EventOutcome {
        let Some(id) = self.resolve(key).map(CompactString::from) else {
            return EventOutcome::NoOp;
        };
        match self.set_active(&id, active) {
            Some(true) => EventOutcome::ActivityChanged,
            Some(false) | None => EventOutcome::NoOp,
        }
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
