//! Sync status aggregation - per-root flags folded into one global signal
//!
//! The [`SyncStatusAggregator`] sits between the
//! [`EventDispatcher`](super::dispatcher::EventDispatcher) and the
//! [`IconAnimator`](super::animator::IconAnimator). Dispatch callbacks update
//! per-root flags from arbitrary tokio workers; the animator only ever reads
//! the folded flag, at its own cadence, without touching the table.
//!
//! ## Flow
//!
//! ```text
//! EventDispatcher ──→ set_status / reset_all ──→ root table (Mutex)
//!                                                     │ OR over values
//! IconAnimator    ──→ is_any_syncing() ←── any_syncing (AtomicBool)
//! ```
//!
//! The folded flag is stored while the table mutex is still held, so a
//! reader never observes the transient empty state of a `reset_all` as
//! "idle" when the incoming snapshot contains a syncing root.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use tracing::debug;

use synctray_core::domain::{Watch, WatchRoot};

// ============================================================================
// SyncStatusAggregator
// ============================================================================

/// Thread-safe map from watch root to "is syncing", with a derived global flag
///
/// Writers race freely across roots; per root, the last write wins. The
/// global flag always equals the OR over the table as left by the most
/// recent completed mutation.
pub struct SyncStatusAggregator {
    /// Per-root syncing flags, replaced wholesale on watch-list refresh
    table: Mutex<HashMap<WatchRoot, bool>>,
    /// OR over all table values, readable without taking the mutex
    any_syncing: AtomicBool,
}

impl SyncStatusAggregator {
    /// Creates an empty aggregator (no roots, not syncing)
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
            any_syncing: AtomicBool::new(false),
        }
    }

    /// Upserts one root's syncing flag and refreshes the global flag
    ///
    /// A root never seen before is inserted. This method is thread-safe via
    /// the internal Mutex; the refreshed global flag is published before the
    /// lock is released.
    pub fn set_status(&self, root: WatchRoot, syncing: bool) {
        let any = {
            let mut table = self.table.lock().unwrap();
            table.insert(root.clone(), syncing);
            let any = table.values().any(|&s| s);
            self.any_syncing.store(any, Ordering::Release);
            any
        };
        debug!(root = %root, syncing, any_syncing = any, "Sync status updated");
    }

    /// Replaces the whole table with a watch-list snapshot
    ///
    /// Roots absent from the snapshot are dropped, so their syncing
    /// contribution vanishes. An empty snapshot leaves the global flag
    /// false.
    pub fn reset_all(&self, watches: &[Watch]) {
        let any = {
            let mut table = self.table.lock().unwrap();
            table.clear();
            for watch in watches {
                table.insert(watch.root.clone(), watch.status.is_syncing());
            }
            let any = table.values().any(|&s| s);
            self.any_syncing.store(any, Ordering::Release);
            any
        };
        debug!(
            watch_count = watches.len(),
            any_syncing = any,
            "Status table reset from watch list"
        );
    }

    /// Non-blocking read of the global "anything syncing" flag
    #[must_use]
    pub fn is_any_syncing(&self) -> bool {
        self.any_syncing.load(Ordering::Acquire)
    }

    /// Point read of one root's flag, `None` if the root is not tracked
    #[must_use]
    pub fn status_of(&self, root: &WatchRoot) -> Option<bool> {
        self.table.lock().unwrap().get(root).copied()
    }
}

impl Default for SyncStatusAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit tests
// ============================================================================
