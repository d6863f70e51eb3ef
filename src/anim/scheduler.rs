//! The per-frame scheduler: an explicit context object, not a process
//! global, so tests can run independent instances.

use std::collections::BTreeMap;

use crate::scene::Scene;

/// A scheduled per-frame callable.
pub trait FrameFunc {
    /// Called once when the entry is started, with the current time.
    fn begin(&mut self, _now_ns: u64) {}

    /// Called once per tick with mutable scene access. Return `true`
    /// when finished; the scheduler removes the entry the same tick.
    fn call(&mut self, scene: &mut Scene, now_ns: u64) -> bool;
}

/// Handle to a scheduled entry, used for cancellation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct FuncId(u64);

/// The active set of scheduled entries, polled once per frame.
///
/// Entries tick in start order. Cancellation between two ticks simply
/// removes the entry; there is no in-progress state to race.
#[derive(Default)]
pub struct Scheduler {
    entries: BTreeMap<FuncId, Box<dyn FrameFunc>>,
    next: u64,
}

impl Scheduler {
    /// An empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an entry, calling its [`FrameFunc::begin`] immediately.
    pub fn start(&mut self, mut func: Box<dyn FrameFunc>, now_ns: u64) -> FuncId {
        func.begin(now_ns);
        let id = FuncId(self.next);
        self.next += 1;
        self.entries.insert(id, func);
        tracing::trace!(?id, "scheduled");
        id
    }

    /// Cancel an entry; returns whether it was still active.
    pub fn cancel(&mut self, id: FuncId) -> bool {
        let removed = self.entries.remove(&id).is_some();
        if removed {
            tracing::trace!(?id, "cancelled");
        }
        removed
    }

    /// Whether an entry is still in the active set.
    #[must_use]
    pub fn is_active(&self, id: FuncId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Tick every entry once, removing those that report completion.
    pub fn tick(&mut self, scene: &mut Scene, now_ns: u64) {
        self.entries.retain(|_, func| !func.call(scene, now_ns));
    }

    /// Number of active entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scheduler({} active)", self.entries.len())
    }
}
