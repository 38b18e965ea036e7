//! # Introduction
//!
//! Algostep runs independently authored algorithm routines under uniform,
//! caller-controlled scheduling: play, pause, single-step, cancel and
//! speed adjustment all live in one engine primitive, so the exact same
//! routine logic runs live-animated, as a headless benchmark, or as a
//! headless correctness check without divergence between the three.
//!
//! ## Execution pipeline
//!
//! ```text
//! Routine → RunScope primitives → Suspension point → MetricsSnapshot
//! ```
//!
//! 1. [`routines`] — the routine function type, the registry, and the
//!    built-in sample routines (sorts, search, traversal).
//! 2. [`engine`] — run contexts with save/install/restore discipline,
//!    the suspension point, execution modes, handles and the runner.
//! 3. [`dataset`] — array and graph datasets with the visual tags a
//!    presentation layer renders.
//! 4. [`selftest`] — deterministic, exception-isolated correctness suite
//!    that replays routines headless against pure references.
//! 5. [`compare`] — multi-round benchmark orchestrator over shared input.
//!
//! ## Scheduling model
//!
//! Single-threaded cooperative per run: a routine yields only inside
//! [`engine::RunContext::suspend`], which is where pausing (a real
//! condition-variable wait, not a poll), stepping, cancellation and
//! speed-derived pacing are enacted. Headless modes skip the pacing
//! entirely but share every other line of the code path.

pub mod compare;
pub mod dataset;
pub mod engine;
pub mod routines;
pub mod selftest;
