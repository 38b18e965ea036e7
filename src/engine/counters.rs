//! Per-run instrumentation counters
//!
//! Four monotonic counters scoped to one run context: comparisons,
//! swaps, generic operations, and element accesses. They are zeroed
//! only when the context is created and only ever incremented, so a
//! presentation layer can read them live (relaxed atomics) while the
//! routine thread is mutating them.

use std::sync::atomic::{AtomicU64, Ordering};

/// Which counter a routine wants to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Comparison,
    Swap,
    Operation,
    Access,
}

/// Monotonic counters for one run.
#[derive(Debug, Default)]
pub struct Counters {
    comparisons: AtomicU64,
    swaps: AtomicU64,
    operations: AtomicU64,
    accesses: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment one counter by one.
    pub fn increment(&self, kind: CounterKind) {
        self.add(kind, 1);
    }

    /// Increment one counter by `n` (e.g. a compare reads two elements).
    pub fn add(&self, kind: CounterKind, n: u64) {
        let counter = match kind {
            CounterKind::Comparison => &self.comparisons,
            CounterKind::Swap => &self.swaps,
            CounterKind::Operation => &self.operations,
            CounterKind::Access => &self.accesses,
        };
        counter.fetch_add(n, Ordering::Relaxed);
    }

    /// Read all four counters at once.
    pub fn totals(&self) -> CounterTotals {
        CounterTotals {
            comparisons: self.comparisons.load(Ordering::Relaxed),
            swaps: self.swaps.load(Ordering::Relaxed),
            operations: self.operations.load(Ordering::Relaxed),
            accesses: self.accesses.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the four counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterTotals {
    pub comparisons: u64,
    pub swaps: u64,
    pub operations: u64,
    pub accesses: u64,
}

impl CounterTotals {
    /// Derived access estimate: the raw access counter plus two reads
    /// per comparison and four touches (two reads, two writes) per swap.
    pub fn estimated_accesses(&self) -> u64 {
        self.accesses + 2 * self.comparisons + 4 * self.swaps
    }
}
