//! Comparison orchestrator
//!
//! Runs two routines head-to-head in headless [`ExecMode::Benchmark`]:
//! each round generates one shared input, runs both routines on clones
//! of it, and records elapsed time and counters. A failed run from
//! either routine aborts the whole comparison and surfaces the
//! captured message — partial statistics would be misleading.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::dataset::Dataset;
use crate::engine::{CounterTotals, Engine, EngineError, ExecMode, RunStatus};

/// Scalar knobs for one comparison.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonConfig {
    pub rounds: usize,
    pub size: usize,
    pub seed: u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            rounds: 10,
            size: 256,
            seed: 0,
        }
    }
}

/// Aggregated statistics for one routine across all rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineStats {
    pub id: String,
    pub mean_elapsed: Duration,
    pub median_elapsed: Duration,
    pub best_elapsed: Duration,
    pub mean_comparisons: f64,
    pub mean_swaps: f64,
    pub mean_operations: f64,
    pub mean_accesses: f64,
}

/// Result of a whole comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub rounds: usize,
    pub size: usize,
    pub a: RoutineStats,
    pub b: RoutineStats,
}

/// Why a comparison could not produce statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// Pre-flight problem resolving a routine or its input
    Engine(EngineError),

    /// A routine's run came back failed (or, unexpectedly, cancelled)
    /// in some round; message surfaced verbatim
    RoundFailed {
        id: String,
        round: usize,
        message: String,
    },

    /// rounds == 0 makes every statistic undefined
    NoRounds,
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::Engine(e) => write!(f, "{}", e),
            CompareError::RoundFailed { id, round, message } => {
                write!(f, "'{}' failed in round {}: {}", id, round, message)
            }
            CompareError::NoRounds => write!(f, "comparison needs at least one round"),
        }
    }
}

impl std::error::Error for CompareError {}

impl From<EngineError> for CompareError {
    fn from(e: EngineError) -> Self {
        CompareError::Engine(e)
    }
}

struct RoundSample {
    elapsed: Duration,
    counters: CounterTotals,
}

/// Run `a` and `b` for `rounds` rounds over shared per-round inputs.
pub fn compare(
    engine: &Engine,
    a: &str,
    b: &str,
    config: &ComparisonConfig,
) -> Result<ComparisonReport, CompareError> {
    if config.rounds == 0 {
        return Err(CompareError::NoRounds);
    }
    // Resolve both up front so a typo fails before any work happens.
    let algo_a = engine.lookup(a)?;
    let algo_b = engine.lookup(b)?;

    let mut samples_a = Vec::with_capacity(config.rounds);
    let mut samples_b = Vec::with_capacity(config.rounds);

    for round in 0..config.rounds {
        let input = Dataset::random_array(config.size, config.seed.wrapping_add(round as u64));
        samples_a.push(run_round(engine, algo_a.id, round, input.clone())?);
        samples_b.push(run_round(engine, algo_b.id, round, input)?);
        debug!(round, a = algo_a.id, b = algo_b.id, "comparison round finished");
    }

    Ok(ComparisonReport {
        rounds: config.rounds,
        size: config.size,
        a: aggregate(algo_a.id, &samples_a),
        b: aggregate(algo_b.id, &samples_b),
    })
}

fn run_round(
    engine: &Engine,
    id: &str,
    round: usize,
    input: Dataset,
) -> Result<RoundSample, CompareError> {
    let outcome = engine.run(id, ExecMode::Benchmark, input, 50)?;
    match outcome.metrics.status {
        RunStatus::Done => Ok(RoundSample {
            elapsed: outcome.metrics.elapsed,
            counters: outcome.metrics.counters,
        }),
        RunStatus::Failed | RunStatus::Cancelled => Err(CompareError::RoundFailed {
            id: id.to_string(),
            round,
            message: outcome
                .metrics
                .error_message
                .unwrap_or_else(|| format!("run ended with status {}", outcome.metrics.status)),
        }),
    }
}

fn aggregate(id: &str, samples: &[RoundSample]) -> RoutineStats {
    let n = samples.len().max(1) as u32;
    let total: Duration = samples.iter().map(|s| s.elapsed).sum();

    let mut sorted: Vec<Duration> = samples.iter().map(|s| s.elapsed).collect();
    sorted.sort_unstable();
    let median = median_of(&sorted);
    let best = sorted.first().copied().unwrap_or_default();

    let nf = samples.len().max(1) as f64;
    let mean_of = |f: fn(&CounterTotals) -> u64| {
        samples.iter().map(|s| f(&s.counters)).sum::<u64>() as f64 / nf
    };

    RoutineStats {
        id: id.to_string(),
        mean_elapsed: total / n,
        median_elapsed: median,
        best_elapsed: best,
        mean_comparisons: mean_of(|c| c.comparisons),
        mean_swaps: mean_of(|c| c.swaps),
        mean_operations: mean_of(|c| c.operations),
        mean_accesses: mean_of(|c| c.accesses),
    }
}

fn median_of(sorted: &[Duration]) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2
    }
}
