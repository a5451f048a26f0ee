//! `TimerQueue` — the host's pending timers, ordered by due time.
//!
//! The engine itself never schedules anything.  Every periodic or one-shot
//! callback the host needs (ETA refresh, departure decision, the initial
//! forced departure, and the per-frame tick while moving) lives here as a
//! `(SimTime, TimerKind)` entry.  `Sim` pops whatever is due, fires it, and
//! pushes the next occurrence of recurring timers.
//!
//! `BTreeMap` keeps due times sorted; timers due at the same instant fire in
//! the order they were pushed.

use std::collections::BTreeMap;

use bt_core::SimTime;

/// What a timer does when it fires.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TimerKind {
    /// Redraw upcoming-stop ETAs.  Recurring.
    EtaRefresh,
    /// Ask the departure policy whether to leave.  Recurring.
    SegmentDecision,
    /// Force the first departure shortly after start.  One-shot.
    InitialMovement,
    /// Advance the in-flight segment.  Recurring while moving.
    Frame,
}

#[derive(Default, Debug)]
pub struct TimerQueue {
    inner: BTreeMap<SimTime, Vec<TimerKind>>,
    /// Cached entry count for O(1) `len()`.
    total: usize,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `at`.
    pub fn push(&mut self, at: SimTime, kind: TimerKind) {
        self.inner.entry(at).or_default().push(kind);
        self.total += 1;
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: SimTime) -> Vec<(SimTime, TimerKind)> {
        let mut due = Vec::new();
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            let (at, kinds) = entry.remove_entry();
            self.total -= kinds.len();
            due.extend(kinds.into_iter().map(|k| (at, k)));
        }
        due
    }

    /// Drop every pending timer of `kind`.  Returns how many were removed.
    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let mut removed = 0;
        self.inner.retain(|_, kinds| {
            let before = kinds.len();
            kinds.retain(|k| *k != kind);
            removed += before - kinds.len();
            !kinds.is_empty()
        });
        self.total -= removed;
        removed
    }

    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }

    /// The earliest due time, or `None` if nothing is pending.
    pub fn next_due(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// Whether any timer of `kind` is pending.
    pub fn contains(&self, kind: TimerKind) -> bool {
        self.inner.values().any(|kinds| kinds.contains(&kind))
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
