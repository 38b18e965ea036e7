//! The suspension point
//!
//! The single primitive every routine must call between observable
//! mutations. Pausing, stepping, cancellation and speed pacing all
//! happen here and nowhere else, which is what makes a routine
//! automatically controllable with zero bookkeeping of its own.
//!
//! Pausing is a real condition-variable wait: the routine thread
//! consumes no CPU while paused and is woken by resume, step, or
//! cancel.

use std::thread;
use std::time::Duration;

use crate::engine::context::RunContext;
use crate::engine::errors::Cancelled;
use crate::engine::mode::{MAX_SPEED, MIN_SPEED};

/// Shortest wait per suspension point (speed 100): still perceptible.
pub const MIN_STEP_DELAY: Duration = Duration::from_millis(10);

/// Longest wait per suspension point (speed 1).
pub const MAX_STEP_DELAY: Duration = Duration::from_millis(800);

/// Monotonic speed → delay mapping, clamped to the bounds above.
pub fn delay_for_speed(speed: u8) -> Duration {
    let speed = u64::from(speed.clamp(MIN_SPEED, MAX_SPEED));
    let min = MIN_STEP_DELAY.as_millis() as u64;
    let max = MAX_STEP_DELAY.as_millis() as u64;
    let span = max - min;
    let range = u64::from(MAX_SPEED - MIN_SPEED);
    Duration::from_millis(max - (speed - u64::from(MIN_SPEED)) * span / range)
}

impl RunContext {
    /// Yield control to the scheduler. In order:
    ///
    /// 1. a pending cancel request raises [`Cancelled`], paused or not;
    /// 2. headless runs return immediately (no pacing, no wait);
    /// 3. while paused, block on the condvar, re-checking for cancel on
    ///    every wake;
    /// 4. a pending step re-arms `paused` so exactly one unit of work
    ///    runs before the next suspension blocks;
    /// 5. otherwise sleep for the speed-derived delay.
    ///
    /// A routine that never reaches a suspension point cannot be paused
    /// or cancelled; the engine imposes no preemption between calls.
    pub fn suspend(&self) -> Result<(), Cancelled> {
        let delay;
        {
            let mut ctl = self.control.lock();
            if ctl.stop_requested {
                return Err(Cancelled);
            }
            if self.is_headless() {
                return Ok(());
            }
            while ctl.paused {
                self.resume.wait(&mut ctl);
                if ctl.stop_requested {
                    return Err(Cancelled);
                }
            }
            if ctl.stepping {
                ctl.stepping = false;
                ctl.paused = true;
            }
            delay = delay_for_speed(ctl.speed);
        }
        thread::sleep(delay);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::engine::mode::ExecMode;

    #[test]
    fn delay_mapping_is_monotonic_and_bounded() {
        assert_eq!(delay_for_speed(1), MAX_STEP_DELAY);
        assert_eq!(delay_for_speed(100), MIN_STEP_DELAY);
        let mut last = delay_for_speed(1);
        for speed in 2..=100 {
            let d = delay_for_speed(speed);
            assert!(d <= last, "delay must not grow with speed");
            last = d;
        }
        assert_eq!(delay_for_speed(0), MAX_STEP_DELAY);
        assert_eq!(delay_for_speed(255), MIN_STEP_DELAY);
    }

    #[test]
    fn headless_suspend_returns_immediately() {
        let ctx = RunContext::new(Dataset::from_values(vec![1, 2]), ExecMode::Benchmark, 50);
        for _ in 0..1000 {
            assert!(ctx.suspend().is_ok());
        }
    }

    #[test]
    fn headless_suspend_still_honors_cancel() {
        let ctx = RunContext::new(Dataset::from_values(vec![1, 2]), ExecMode::SelfTest, 50);
        ctx.request_cancel();
        assert_eq!(ctx.suspend(), Err(Cancelled));
    }

    #[test]
    fn cancel_wins_over_pause() {
        let ctx = RunContext::new(Dataset::from_values(vec![1, 2]), ExecMode::Interactive, 100);
        ctx.request_pause();
        ctx.request_cancel();
        // Would block forever if the pause wait did not re-check cancel.
        assert_eq!(ctx.suspend(), Err(Cancelled));
    }
}
