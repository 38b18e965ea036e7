//! The runner: mode-driven execution with ambient-context discipline
//!
//! `run()` is the single entry point for all three regimes. It builds a
//! fresh context, installs it as the engine's one ambient context
//! (saving whatever was there), executes the routine with panics
//! contained, folds the outcome into a [`MetricsSnapshot`], and
//! restores the previous ambient context on every exit path via a drop
//! guard. Failures never escape as errors; callers inspect the
//! snapshot's status.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::engine::context::{RunContext, RunScope};
use crate::engine::counters::CounterTotals;
use crate::engine::errors::{EngineError, RoutineError};
use crate::engine::handle::ExecutionHandle;
use crate::engine::mode::ExecMode;
use crate::routines::{builtin_registry, Algorithm, RoutineFn};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The routine returned normally
    Done,
    /// A cancel request was honored at a suspension point
    Cancelled,
    /// The routine faulted or panicked; message captured
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Done => write!(f, "done"),
            RunStatus::Cancelled => write!(f, "cancelled"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Immutable summary of one completed run. Independent of the run
/// context's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub status: RunStatus,
    pub counters: CounterTotals,
    pub elapsed: Duration,
    pub error_message: Option<String>,
}

impl MetricsSnapshot {
    pub fn is_done(&self) -> bool {
        self.status == RunStatus::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == RunStatus::Cancelled
    }

    pub fn is_failed(&self) -> bool {
        self.status == RunStatus::Failed
    }

    /// See [`CounterTotals::estimated_accesses`].
    pub fn estimated_accesses(&self) -> u64 {
        self.counters.estimated_accesses()
    }
}

/// Metrics plus the final dataset state.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub metrics: MetricsSnapshot,
    pub dataset: Dataset,
}

struct EngineInner {
    registry: RwLock<FxHashMap<&'static str, Algorithm>>,
    ambient: Mutex<Option<Arc<RunContext>>>,
}

/// The execution engine: routine registry plus the single ambient
/// context slot. Cheap to clone (shared inner).
#[derive(Clone)]
pub struct Engine {
    inner: Arc<EngineInner>,
}

impl Engine {
    /// Engine with the built-in routines registered.
    pub fn new() -> Self {
        Engine {
            inner: Arc::new(EngineInner {
                registry: RwLock::new(builtin_registry()),
                ambient: Mutex::new(None),
            }),
        }
    }

    /// Register (or replace) a routine.
    pub fn register(&self, algo: Algorithm) {
        self.inner.registry.write().insert(algo.id, algo);
    }

    pub fn lookup(&self, id: &str) -> Result<Algorithm, EngineError> {
        self.inner
            .registry
            .read()
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownAlgorithm { id: id.to_string() })
    }

    /// All registered algorithms, sorted by id.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        let mut algos: Vec<Algorithm> = self.inner.registry.read().values().copied().collect();
        algos.sort_by_key(|a| a.id);
        algos
    }

    /// The currently ambient run context, if any. At most one exists at
    /// any instant.
    pub fn ambient(&self) -> Option<Arc<RunContext>> {
        self.inner.ambient.lock().clone()
    }

    /// Run a registered routine to completion on the calling thread.
    ///
    /// Pre-flight problems (unknown id, wrong dataset kind) come back
    /// as `Err`; everything that happens *during* the run — including
    /// cancellation and routine failure — is reported inside the
    /// returned outcome's metrics.
    pub fn run(
        &self,
        id: &str,
        mode: ExecMode,
        dataset: Dataset,
        speed: u8,
    ) -> Result<RunOutcome, EngineError> {
        let algo = self.lookup(id)?;
        if algo.input != dataset.kind() {
            return Err(EngineError::DatasetMismatch {
                id: id.to_string(),
                expected: algo.input,
                got: dataset.kind(),
            });
        }
        Ok(self.run_routine(algo.run, mode, dataset, speed, algo.id))
    }

    /// Run an unregistered routine directly (same semantics as
    /// [`Engine::run`]).
    pub fn run_routine(
        &self,
        routine: RoutineFn,
        mode: ExecMode,
        dataset: Dataset,
        speed: u8,
        label: &str,
    ) -> RunOutcome {
        let ctx = Arc::new(RunContext::new(dataset, mode, speed));
        let prev = self.install(&ctx);
        self.execute_installed(routine, ctx, prev, label)
    }

    /// Start an interactive run on a worker thread. The context is
    /// installed as ambient *before* the worker starts, so the returned
    /// handle is effective even before the routine reaches its first
    /// suspension point.
    pub fn start(
        &self,
        id: &str,
        dataset: Dataset,
        speed: u8,
    ) -> Result<InteractiveRun, EngineError> {
        let algo = self.lookup(id)?;
        if algo.input != dataset.kind() {
            return Err(EngineError::DatasetMismatch {
                id: id.to_string(),
                expected: algo.input,
                got: dataset.kind(),
            });
        }
        let ctx = Arc::new(RunContext::new(dataset, ExecMode::Interactive, speed));
        let prev = self.install(&ctx);
        let handle = ExecutionHandle::new(Arc::clone(&ctx));
        let engine = self.clone();
        let worker =
            thread::spawn(move || engine.execute_installed(algo.run, ctx, prev, algo.id));
        Ok(InteractiveRun { handle, worker })
    }

    /// Swap the fresh context into the ambient slot, returning whatever
    /// was there (restored later by the guard).
    fn install(&self, ctx: &Arc<RunContext>) -> Option<Arc<RunContext>> {
        self.inner.ambient.lock().replace(Arc::clone(ctx))
    }

    fn execute_installed(
        &self,
        routine: RoutineFn,
        ctx: Arc<RunContext>,
        prev: Option<Arc<RunContext>>,
        label: &str,
    ) -> RunOutcome {
        // Restores `prev` on every exit path, including panics below.
        let _guard = AmbientGuard {
            slot: &self.inner.ambient,
            prev: Some(prev),
        };

        debug!(algorithm = label, mode = ctx.mode().label(), "run started");

        let scope = RunScope::new(Arc::clone(&ctx));
        let result = panic::catch_unwind(AssertUnwindSafe(|| routine(&scope)));
        ctx.finish();

        let (status, error_message) = match result {
            Ok(Ok(())) => (RunStatus::Done, None),
            // Expected control flow; deliberately not logged as an error.
            Ok(Err(RoutineError::Cancelled)) => (RunStatus::Cancelled, None),
            Ok(Err(RoutineError::Fault { message })) => {
                warn!(algorithm = label, %message, "routine fault captured");
                (RunStatus::Failed, Some(message))
            }
            Err(payload) => {
                let message = panic_message(payload);
                warn!(algorithm = label, %message, "routine panic captured");
                (RunStatus::Failed, Some(message))
            }
        };

        let metrics = MetricsSnapshot {
            status,
            counters: ctx.counters(),
            elapsed: ctx.elapsed(),
            error_message,
        };
        debug!(
            algorithm = label,
            status = %metrics.status,
            comparisons = metrics.counters.comparisons,
            swaps = metrics.counters.swaps,
            "run finished"
        );

        RunOutcome {
            metrics,
            dataset: ctx.dataset_snapshot(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight interactive run: the control handle plus the worker.
pub struct InteractiveRun {
    handle: ExecutionHandle,
    worker: JoinHandle<RunOutcome>,
}

impl InteractiveRun {
    pub fn handle(&self) -> &ExecutionHandle {
        &self.handle
    }

    /// Block until the run ends and return its outcome.
    pub fn wait(self) -> RunOutcome {
        match self.worker.join() {
            Ok(outcome) => outcome,
            // The worker catches routine panics itself; reaching this
            // arm means the runner's own bookkeeping panicked.
            Err(_) => RunOutcome {
                metrics: MetricsSnapshot {
                    status: RunStatus::Failed,
                    counters: self.handle.counters(),
                    elapsed: self.handle.elapsed(),
                    error_message: Some("run worker panicked outside the routine".to_string()),
                },
                dataset: self.handle.dataset(),
            },
        }
    }
}

struct AmbientGuard<'a> {
    slot: &'a Mutex<Option<Arc<RunContext>>>,
    prev: Option<Option<Arc<RunContext>>>,
}

impl Drop for AmbientGuard<'_> {
    fn drop(&mut self) {
        if let Some(prev) = self.prev.take() {
            *self.slot.lock() = prev;
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "routine panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::RoutineError;

    fn failing_routine(_: &RunScope) -> Result<(), RoutineError> {
        Err(RoutineError::fault("injected fault"))
    }

    fn panicking_routine(_: &RunScope) -> Result<(), RoutineError> {
        panic!("boom");
    }

    #[test]
    fn unknown_id_is_a_preflight_error() {
        let engine = Engine::new();
        let err = engine
            .run(
                "no-such-algorithm",
                ExecMode::SelfTest,
                Dataset::from_values(vec![1]),
                50,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownAlgorithm { .. }));
    }

    #[test]
    fn dataset_kind_is_checked_before_running() {
        let engine = Engine::new();
        let err = engine
            .run(
                "bubble-sort",
                ExecMode::SelfTest,
                Dataset::sample_graph(4, 0),
                50,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::DatasetMismatch { .. }));
    }

    #[test]
    fn routine_fault_becomes_failed_snapshot() {
        let engine = Engine::new();
        let outcome = engine.run_routine(
            failing_routine,
            ExecMode::SelfTest,
            Dataset::from_values(vec![1, 2]),
            50,
            "failing",
        );
        assert!(outcome.metrics.is_failed());
        assert_eq!(outcome.metrics.error_message.as_deref(), Some("injected fault"));
        // The failure was contained; the engine is reusable.
        assert!(engine.ambient().is_none());
    }

    #[test]
    fn routine_panic_becomes_failed_snapshot() {
        let engine = Engine::new();
        let outcome = engine.run_routine(
            panicking_routine,
            ExecMode::SelfTest,
            Dataset::from_values(vec![1, 2]),
            50,
            "panicking",
        );
        assert!(outcome.metrics.is_failed());
        assert_eq!(outcome.metrics.error_message.as_deref(), Some("boom"));
        assert!(engine.ambient().is_none());
    }

    #[test]
    fn ambient_slot_is_empty_between_runs() {
        let engine = Engine::new();
        assert!(engine.ambient().is_none());
        let outcome = engine
            .run(
                "bubble-sort",
                ExecMode::Benchmark,
                Dataset::random_array(16, 1),
                50,
            )
            .unwrap();
        assert!(outcome.metrics.is_done());
        assert!(engine.ambient().is_none());
    }
}
