//! Append-only, shareable index container.
//!
//! A [`SearchIndex`] lives for the duration of one session. The catalog is
//! appended synchronously, then enrichment tasks append Subject entries as
//! their pages arrive, in no particular order. Nothing is ever removed or
//! rewritten, so readers only need a consistent snapshot.
//!
//! Uses `std::sync::RwLock` for the entry list and atomics for the build
//! guard and the enrichment counter, so the container can be shared behind
//! an `Arc` across tasks.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

use serde::Serialize;

use crate::models::{EntryKind, IndexEntry};

/// Point-in-time counters for an index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub entries: usize,
    pub by_kind: BTreeMap<&'static str, usize>,
    pub built: bool,
    pub enrichment_pending: usize,
}

#[derive(Default)]
pub struct SearchIndex {
    entries: RwLock<Vec<IndexEntry>>,
    built: AtomicBool,
    pending: AtomicUsize,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<IndexEntry>> {
        // appends cannot leave the Vec half-written, so a poisoned lock is still readable
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, entry: IndexEntry) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.push(entry);
    }

    pub fn extend<I: IntoIterator<Item = IndexEntry>>(&self, items: I) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.extend(items);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Run `f` against the current entries under the read lock.
    pub fn with_entries<R>(&self, f: impl FnOnce(&[IndexEntry]) -> R) -> R {
        f(&self.read())
    }

    pub fn snapshot(&self) -> Vec<IndexEntry> {
        self.read().clone()
    }

    /// Claim the one-time build. Returns `false` if it was already claimed.
    ///
    /// "Built" only certifies the synchronous catalog; enrichment may still
    /// be running (see [`enrichment_in_progress`](Self::enrichment_in_progress)).
    pub fn mark_built(&self) -> bool {
        self.built
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_built(&self) -> bool {
        self.built.load(Ordering::Acquire)
    }

    /// Record `n` enrichment jobs as started.
    pub fn begin_enrichment(&self, n: usize) {
        self.pending.fetch_add(n, Ordering::AcqRel);
    }

    /// Record one enrichment job as finished, successfully or not.
    pub fn finish_enrichment(&self) {
        let _ = self
            .pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |p| p.checked_sub(1));
    }

    pub fn pending_enrichment(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    pub fn enrichment_in_progress(&self) -> bool {
        self.pending_enrichment() > 0
    }

    pub fn stats(&self) -> IndexStats {
        let entries = self.read();
        let mut by_kind: BTreeMap<&'static str, usize> =
            EntryKind::ALL.iter().map(|k| (k.as_str(), 0)).collect();
        for e in entries.iter() {
            *by_kind.entry(e.kind.as_str()).or_default() += 1;
        }
        IndexStats {
            entries: entries.len(),
            by_kind,
            built: self.is_built(),
            enrichment_pending: self.pending_enrichment(),
        }
    }
}
