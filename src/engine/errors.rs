//! Error and signal types for the execution engine
//!
//! This module defines [`Cancelled`] (an expected control-flow signal,
//! not a real error), [`RoutineError`] (what a routine body can return),
//! and [`EngineError`] (pre-flight problems detected before a run
//! context is ever created).
//!
//! Failures raised *during* a run never cross the `run()` boundary as
//! errors — they are folded into the run's metrics snapshot.

use std::fmt;

use crate::dataset::DatasetKind;

/// Cooperative cancellation signal.
///
/// Raised by [`crate::engine::RunContext::suspend`] once a cancel
/// request has been observed. It is expected control flow: the runner
/// maps it to a `Cancelled` status and never logs it as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run cancelled at suspension point")
    }
}

/// Errors a routine body may surface to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineError {
    /// The routine observed a cancel request at a suspension point
    Cancelled,

    /// The routine's own logic failed (bad input shape, broken
    /// invariant, arithmetic problem). Captured verbatim into the
    /// metrics snapshot.
    Fault { message: String },
}

impl RoutineError {
    /// Convenience constructor for routine-side failures.
    pub fn fault(message: impl Into<String>) -> Self {
        RoutineError::Fault {
            message: message.into(),
        }
    }
}

impl From<Cancelled> for RoutineError {
    fn from(_: Cancelled) -> Self {
        RoutineError::Cancelled
    }
}

impl fmt::Display for RoutineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutineError::Cancelled => write!(f, "cancelled"),
            RoutineError::Fault { message } => write!(f, "routine fault: {}", message),
        }
    }
}

impl std::error::Error for RoutineError {}

/// Errors detected before a run starts (no run context exists yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No routine registered under the requested id
    UnknownAlgorithm { id: String },

    /// The supplied dataset kind does not match what the routine expects
    DatasetMismatch {
        id: String,
        expected: DatasetKind,
        got: DatasetKind,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownAlgorithm { id } => {
                write!(f, "unknown algorithm '{}'", id)
            }
            EngineError::DatasetMismatch { id, expected, got } => {
                write!(
                    f,
                    "algorithm '{}' expects a {} dataset, got {}",
                    id, expected, got
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}
