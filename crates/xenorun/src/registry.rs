//! The registry mapping opaque handles to native-side values.
//!
//! The foreign side communicates completion via an opaque handle plus a
//! callback invocation - native references cannot safely cross the
//! boundary. The registry is the single bridge-owned indirection table
//! translating "foreign-side handle" back into "native-side resolver to
//! invoke".
//!
//! ## Invariants
//!
//! - Handles are assigned on insert and never reused while the entry is live
//! - Removal is destructive and atomic
//! - Removing an unknown handle is a protocol violation and panics

use std::sync::LazyLock;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use dashmap::DashMap;
use tokio::sync::oneshot;

use crate::handles::PollId;
use crate::status::PollResult;

/// A map from fresh integer handles to owned values.
///
/// Entries may be inserted and removed from interleaved bridged calls, and
/// the continuation callback may remove entries from a foreign thread, so
/// the map is safe to share without external locking.
pub struct HandleMap<V> {
    entries: DashMap<u64, V>,
    next_id: AtomicU64,
}

impl<V> HandleMap<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store `value` and return a fresh handle.
    ///
    /// Handles are never reused while the mapped entry is live.
    pub fn insert(&self, value: V) -> PollId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, value);
        PollId(id)
    }

    /// Remove and return the value stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` has no live entry. A missing entry means one side
    /// broke the protocol (double continuation, stale handle); it must fail
    /// loudly rather than surface as a runtime error.
    pub fn remove(&self, id: PollId) -> V {
        match self.entries.remove(&id.0) {
            Some((_, value)) => value,
            None => panic!("protocol violation: no live entry for handle {:?}", id),
        }
    }

    /// Current number of live entries. Diagnostics and tests only; never
    /// consulted for control flow.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for HandleMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending resolvers for in-flight poll cycles, shared by every bridged
/// call in the process. Each entry is owned by exactly one poll cycle from
/// registration to removal.
pub(crate) static RESOLVERS: LazyLock<HandleMap<oneshot::Sender<PollResult>>> =
    LazyLock::new(HandleMap::new);

/// Number of poll cycles currently awaiting their continuation callback.
///
/// Testing-only introspection: after a set of bridged calls settles, this
/// returns to its pre-test baseline.
pub fn live_resolver_count() -> usize {
    RESOLVERS.len()
}
