//! Run contexts: the full mutable world one run operates on
//!
//! A [`RunContext`] owns the dataset, the instrumentation counters and
//! the control flags for exactly one in-flight run. The engine keeps at
//! most one context "ambient" at a time; nested headless runs save and
//! restore the slot around their own context (see the runner).
//!
//! Routines never touch a context directly — they receive a
//! [`RunScope`], which bundles the three primitives a routine may use
//! (suspend, count, dataset access) and centralizes all bookkeeping so
//! routine bodies carry none of their own.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::dataset::{Dataset, Tag};
use crate::engine::counters::{CounterKind, CounterTotals, Counters};
use crate::engine::errors::{Cancelled, RoutineError};
use crate::engine::mode::{ExecMode, MAX_SPEED, MIN_SPEED};

/// Control flags for one run. Mutated by the execution handle, read at
/// every suspension point.
#[derive(Debug, Clone, Copy)]
pub struct ControlFlags {
    /// True from install until the run finishes (any status)
    pub running: bool,
    /// Suspension points block while set
    pub paused: bool,
    /// One step-delimited unit may elapse, then `paused` is re-set
    pub stepping: bool,
    /// Once set, never cleared within the run
    pub stop_requested: bool,
    /// Pacing input, 1 (slowest) ..= 100 (fastest)
    pub speed: u8,
}

impl ControlFlags {
    fn new(speed: u8) -> Self {
        ControlFlags {
            running: true,
            paused: false,
            stepping: false,
            stop_requested: false,
            speed,
        }
    }
}

/// The mutable state owned by exactly one in-flight run.
pub struct RunContext {
    mode: ExecMode,
    headless: bool,
    dataset: Mutex<Dataset>,
    counters: Counters,
    pub(crate) control: Mutex<ControlFlags>,
    pub(crate) resume: Condvar,
    started: Instant,
}

impl RunContext {
    /// Fresh context: counters zeroed, flags reset, speed per mode
    /// (headless modes pin it to maximum).
    pub fn new(dataset: Dataset, mode: ExecMode, speed: u8) -> Self {
        let speed = mode.initial_speed(speed.clamp(MIN_SPEED, MAX_SPEED));
        RunContext {
            mode,
            headless: mode.is_headless(),
            dataset: Mutex::new(dataset),
            counters: Counters::new(),
            control: Mutex::new(ControlFlags::new(speed)),
            resume: Condvar::new(),
            started: Instant::now(),
        }
    }

    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Copy of the control flags at this instant.
    pub fn flags(&self) -> ControlFlags {
        *self.control.lock()
    }

    pub fn counters(&self) -> CounterTotals {
        self.counters.totals()
    }

    pub fn increment(&self, kind: CounterKind) {
        self.counters.increment(kind);
    }

    pub(crate) fn add_count(&self, kind: CounterKind, n: u64) {
        self.counters.add(kind, n);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Run the closure with the dataset locked.
    pub fn with_dataset<R>(&self, f: impl FnOnce(&mut Dataset) -> R) -> R {
        f(&mut self.dataset.lock())
    }

    /// Clone of the dataset at this instant (cheap enough for teaching
    /// sized inputs; the presentation layer renders from these).
    pub fn dataset_snapshot(&self) -> Dataset {
        self.dataset.lock().clone()
    }

    // ---- control surface (driven by ExecutionHandle) ----

    pub(crate) fn request_pause(&self) {
        self.control.lock().paused = true;
    }

    pub(crate) fn request_resume(&self) {
        let mut ctl = self.control.lock();
        ctl.paused = false;
        ctl.stepping = false;
        drop(ctl);
        self.resume.notify_all();
    }

    /// No-op unless paused: release the wait for exactly one unit.
    pub(crate) fn request_step(&self) {
        let mut ctl = self.control.lock();
        if !ctl.paused {
            return;
        }
        ctl.paused = false;
        ctl.stepping = true;
        drop(ctl);
        self.resume.notify_all();
    }

    /// Sticky: once requested, the next suspension point (including a
    /// wait in progress) raises [`Cancelled`].
    pub(crate) fn request_cancel(&self) {
        self.control.lock().stop_requested = true;
        self.resume.notify_all();
    }

    pub(crate) fn set_speed(&self, speed: u8) {
        self.control.lock().speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Marks the run finished; called once by the runner.
    pub(crate) fn finish(&self) {
        self.control.lock().running = false;
    }

    pub fn is_finished(&self) -> bool {
        !self.control.lock().running
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("mode", &self.mode)
            .field("headless", &self.headless)
            .field("flags", &self.flags())
            .field("counters", &self.counters())
            .finish()
    }
}

/// The engine surface a routine sees: the three primitives from the
/// registration contract, plus array/graph conveniences built on them.
/// Every convenience does its own counting and bounds checking, so a
/// routine body is just algorithm logic and `suspend()?` calls.
pub struct RunScope {
    ctx: Arc<RunContext>,
}

impl RunScope {
    pub(crate) fn new(ctx: Arc<RunContext>) -> Self {
        RunScope { ctx }
    }

    /// The suspension point. See [`RunContext::suspend`].
    pub fn suspend(&self) -> Result<(), Cancelled> {
        self.ctx.suspend()
    }

    /// Bump one instrumentation counter.
    pub fn count(&self, kind: CounterKind) {
        self.ctx.increment(kind);
    }

    pub fn mode(&self) -> ExecMode {
        self.ctx.mode()
    }

    // ---- array primitives ----

    /// Length of the array dataset (0 for graph datasets).
    pub fn len(&self) -> usize {
        self.ctx
            .with_dataset(|d| d.as_array().map(|a| a.len()).unwrap_or(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one element. Counts one access.
    pub fn read(&self, index: usize) -> Result<i64, RoutineError> {
        self.ctx.increment(CounterKind::Access);
        self.ctx
            .with_dataset(|d| d.as_array().and_then(|a| a.get(index)))
            .ok_or_else(|| RoutineError::fault(format!("array read out of range: {}", index)))
    }

    /// Write one element. Counts one access and one operation.
    pub fn write(&self, index: usize, value: i64) -> Result<(), RoutineError> {
        self.ctx.increment(CounterKind::Access);
        self.ctx.increment(CounterKind::Operation);
        self.ctx.with_dataset(|d| {
            let arr = d
                .as_array_mut()
                .ok_or_else(|| RoutineError::fault("array write on non-array dataset"))?;
            if index >= arr.len() {
                return Err(RoutineError::fault(format!(
                    "array write out of range: {}",
                    index
                )));
            }
            arr.set(index, value);
            Ok(())
        })
    }

    /// Compare two elements, counting one comparison (and the two reads
    /// it implies). Tags both elements [`Tag::Compared`].
    pub fn compare(&self, a: usize, b: usize) -> Result<Ordering, RoutineError> {
        self.ctx.increment(CounterKind::Comparison);
        self.ctx.add_count(CounterKind::Access, 2);
        self.ctx.with_dataset(|d| {
            let arr = d
                .as_array_mut()
                .ok_or_else(|| RoutineError::fault("compare on non-array dataset"))?;
            let (va, vb) = match (arr.get(a), arr.get(b)) {
                (Some(va), Some(vb)) => (va, vb),
                _ => {
                    return Err(RoutineError::fault(format!(
                        "compare out of range: {} vs {}",
                        a, b
                    )))
                }
            };
            arr.set_tag(a, Tag::Compared);
            arr.set_tag(b, Tag::Compared);
            Ok(va.cmp(&vb))
        })
    }

    /// Swap two elements, counting one swap. Tags both [`Tag::Swapped`].
    pub fn swap(&self, a: usize, b: usize) -> Result<(), RoutineError> {
        self.ctx.increment(CounterKind::Swap);
        self.ctx.with_dataset(|d| {
            let arr = d
                .as_array_mut()
                .ok_or_else(|| RoutineError::fault("swap on non-array dataset"))?;
            if a >= arr.len() || b >= arr.len() {
                return Err(RoutineError::fault(format!(
                    "swap out of range: {} vs {}",
                    a, b
                )));
            }
            arr.swap(a, b);
            arr.set_tag(a, Tag::Swapped);
            arr.set_tag(b, Tag::Swapped);
            Ok(())
        })
    }

    /// Set a visual tag on one element.
    pub fn mark(&self, index: usize, tag: Tag) {
        self.ctx.with_dataset(|d| {
            if let Some(arr) = d.as_array_mut() {
                arr.set_tag(index, tag);
            }
        });
    }

    /// Reset every visual tag.
    pub fn clear_tags(&self) {
        self.ctx.with_dataset(|d| {
            if let Some(arr) = d.as_array_mut() {
                arr.clear_tags();
            }
        });
    }

    // ---- graph primitives ----

    /// Run a closure against the graph payload. Faults on array input.
    pub fn with_graph<R>(
        &self,
        f: impl FnOnce(&mut crate::dataset::GraphData) -> R,
    ) -> Result<R, RoutineError> {
        self.ctx.with_dataset(|d| {
            d.as_graph_mut()
                .map(f)
                .ok_or_else(|| RoutineError::fault("graph operation on non-graph dataset"))
        })
    }
}
