//! Caller-facing control surface for one run
//!
//! An [`ExecutionHandle`] is created alongside a run context and is the
//! only thing a presentation layer needs: pause/resume/step/cancel,
//! speed adjustment, and live metric reads. It stays safe to call after
//! the run ends (the requests just have nothing left to affect), but
//! per the engine contract it is only meaningful until then.

use std::sync::Arc;
use std::time::Duration;

use crate::dataset::Dataset;
use crate::engine::context::RunContext;
use crate::engine::counters::CounterTotals;

/// Cloneable control surface over one run context.
#[derive(Clone)]
pub struct ExecutionHandle {
    ctx: Arc<RunContext>,
}

impl ExecutionHandle {
    pub(crate) fn new(ctx: Arc<RunContext>) -> Self {
        ExecutionHandle { ctx }
    }

    /// Block the run at its next suspension point. Idempotent: pausing
    /// a paused run changes nothing.
    pub fn pause(&self) {
        self.ctx.request_pause();
    }

    /// Release a paused run. Also clears a pending step.
    pub fn resume(&self) {
        self.ctx.request_resume();
    }

    /// Let exactly one step-delimited unit of work elapse, then return
    /// to the paused state. No-op if the run is not paused.
    pub fn step(&self) {
        self.ctx.request_step();
    }

    /// Request cooperative cancellation: honored at the next suspension
    /// point (including a pause wait already in progress). Never
    /// cleared for the remainder of the run.
    pub fn cancel(&self) {
        self.ctx.request_cancel();
    }

    /// Adjust pacing; clamped to 1..=100. Headless runs ignore pacing
    /// so this only matters for interactive runs.
    pub fn set_speed(&self, speed: u8) {
        self.ctx.set_speed(speed);
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.flags().paused
    }

    pub fn is_finished(&self) -> bool {
        self.ctx.is_finished()
    }

    /// Live counter totals (safe to poll from a render loop).
    pub fn counters(&self) -> CounterTotals {
        self.ctx.counters()
    }

    pub fn elapsed(&self) -> Duration {
        self.ctx.elapsed()
    }

    /// Clone of the dataset as it looks right now; what a renderer
    /// draws between frames.
    pub fn dataset(&self) -> Dataset {
        self.ctx.dataset_snapshot()
    }

    /// The underlying context; used by tests asserting identity across
    /// nested runs.
    pub fn context(&self) -> &Arc<RunContext> {
        &self.ctx
    }
}
