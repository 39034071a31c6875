//! The explicit context object.
//!
//! Built once at startup and passed to whoever needs channel state. It
//! owns the directory lock, the balance mode source and the sort cache.
//! The directory lock is a synchronous `RwLock` that must never be held
//! across an `.await`; its guards are `!Send`, which makes spawned tasks
//! that try to do so fail to compile.

use crate::config::BalanceModeProvider;
use crate::directory::{ChannelDirectory, MergeSummary};
use crate::entities::ChannelHandle;
use crate::views::{self, Totals};
use chanwatch_sdk::objects::{BalanceMode, ChannelRecord};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared handle to the channel model and its derived views.
///
/// Cloning is cheap; all clones see the same directory.
#[derive(Clone)]
pub struct ChannelContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    directory: RwLock<ChannelDirectory>,
    balance_mode: Arc<dyn BalanceModeProvider>,
    sorted_cache: Mutex<Option<SortedCache>>,
}

struct SortedCache {
    version: u64,
    mode: BalanceMode,
    channels: Arc<[ChannelHandle]>,
}

impl ChannelContext {
    pub fn new(balance_mode: Arc<dyn BalanceModeProvider>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                directory: RwLock::new(ChannelDirectory::new()),
                balance_mode,
                sorted_cache: Mutex::new(None),
            }),
        }
    }

    /// Shared read access to the directory.
    pub fn directory(&self) -> RwLockReadGuard<'_, ChannelDirectory> {
        self.inner
            .directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive access. Every merge or event holds this for its whole
    /// duration, which is what makes each of them atomic.
    pub(crate) fn directory_mut(&self) -> RwLockWriteGuard<'_, ChannelDirectory> {
        self.inner
            .directory
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge a snapshot under one write lock.
    pub fn merge_snapshot(&self, records: &[ChannelRecord]) -> MergeSummary {
        self.directory_mut().merge_snapshot(records)
    }

    pub fn len(&self) -> usize {
        self.directory().len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<ChannelHandle> {
        self.directory().get(id)
    }

    pub fn balance_mode(&self) -> BalanceMode {
        self.inner.balance_mode.balance_mode()
    }

    pub fn active_channels(&self) -> Vec<ChannelHandle> {
        views::active_channels(self.directory().iter())
    }

    pub fn totals(&self) -> Totals {
        views::totals(self.directory().iter())
    }

    /// Channels ordered by the current balance mode.
    pub fn sorted_channels(&self) -> Arc<[ChannelHandle]> {
        self.sorted_channels_by(self.balance_mode())
    }

    /// Channels ordered by `mode`, memoized until the directory changes.
    pub fn sorted_channels_by(&self, mode: BalanceMode) -> Arc<[ChannelHandle]> {
        let directory = self.directory();
        let version = directory.version();
        let mut cache = self
            .inner
            .sorted_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = cache
            .as_ref()
            .filter(|c| c.version == version && c.mode == mode)
        {
            return Arc::clone(&cached.channels);
        }

        let channels: Arc<[ChannelHandle]> =
            views::sorted_channels(directory.iter(), mode).into();
        *cache = Some(SortedCache {
            version,
            mode,
            channels: Arc::clone(&channels),
        });
        channels
    }
}
