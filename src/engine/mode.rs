//! Execution modes
//!
//! The three regimes differ only in how the suspension point behaves
//! (headless modes skip pacing) and in who consumes the result; every
//! other line of the run path is shared.

/// Speed bounds accepted by the engine (inclusive).
pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 100;

/// Which regime a run executes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Live animated run; pacing derived from the caller's speed,
    /// rendering/audio side effects in the host fire normally.
    Interactive,

    /// Headless timed run used by the comparison orchestrator.
    Benchmark,

    /// Headless verification run used by the self-test harness.
    SelfTest,
}

impl ExecMode {
    /// Headless modes bypass pacing and suppress host side effects.
    pub fn is_headless(self) -> bool {
        match self {
            ExecMode::Interactive => false,
            ExecMode::Benchmark | ExecMode::SelfTest => true,
        }
    }

    /// The speed a fresh context starts with: headless runs are pinned
    /// to maximum so no perceptible delay can sneak in; interactive
    /// runs take the caller's value.
    pub fn initial_speed(self, requested: u8) -> u8 {
        if self.is_headless() {
            MAX_SPEED
        } else {
            requested
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExecMode::Interactive => "interactive",
            ExecMode::Benchmark => "benchmark",
            ExecMode::SelfTest => "self-test",
        }
    }
}
