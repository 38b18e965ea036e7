//! The execution engine
//!
//! This module is the core of the crate:
//! - [`context`]: run contexts (dataset + counters + flags) and the
//!   [`RunScope`] primitives routines are written against
//! - [`suspend`]: the suspension point, where all cooperative control
//!   is enacted
//! - [`mode`]: the three execution regimes
//! - [`handle`]: the caller-facing pause/resume/step/cancel surface
//! - [`runner`]: `run()` / `start()` with save-install-restore ambient
//!   discipline and failure containment
//! - [`errors`]: the cancellation signal and error taxonomy
//!
//! # Control model
//!
//! Everything is cooperative: a cancel or pause request takes effect at
//! the routine's next suspension point, never before. Within one run
//! context, suspension points are strictly sequential; across contexts,
//! an outer run is fully suspended while a nested headless run
//! completes, so no two contexts are ever concurrently active.

pub mod context;
pub mod counters;
pub mod errors;
pub mod handle;
pub mod mode;
pub mod runner;
pub mod suspend;

pub use context::{ControlFlags, RunContext, RunScope};
pub use counters::{CounterKind, CounterTotals};
pub use errors::{Cancelled, EngineError, RoutineError};
pub use handle::ExecutionHandle;
pub use mode::{ExecMode, MAX_SPEED, MIN_SPEED};
pub use runner::{Engine, InteractiveRun, MetricsSnapshot, RunOutcome, RunStatus};
pub use suspend::{delay_for_speed, MAX_STEP_DELAY, MIN_STEP_DELAY};
