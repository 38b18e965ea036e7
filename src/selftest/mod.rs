//! Self-test harness
//!
//! A fixed suite of deterministic cases, each replaying a routine
//! through the engine in headless [`ExecMode::SelfTest`] and checking
//! the result against an independently written pure reference (or a
//! structural invariant). Cases are exception-isolated: a failing or
//! panicking case is reported with its message and the rest of the
//! suite still runs.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::dataset::{Dataset, GraphData, Tag};
use crate::engine::{Engine, ExecMode, RunOutcome};
use crate::routines::Family;

/// One correctness check. The check may itself start headless runs.
pub struct SelfTestCase {
    pub name: String,
    pub check: Box<dyn Fn(&Engine) -> Result<(), String> + Send + Sync>,
}

impl SelfTestCase {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&Engine) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        SelfTestCase {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

/// Per-case result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Aggregate result for one suite execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
    pub passed_count: usize,
    pub failed_count: usize,
    pub elapsed_ms: u64,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed_count == 0
    }
}

/// Run every case, isolating failures and panics to the case that
/// produced them.
pub fn run_suite(engine: &Engine, cases: &[SelfTestCase]) -> SuiteReport {
    let started = Instant::now();
    let mut reports = Vec::with_capacity(cases.len());
    let mut passed_count = 0;
    let mut failed_count = 0;

    for case in cases {
        let result = panic::catch_unwind(AssertUnwindSafe(|| (case.check)(engine)));
        let (passed, detail) = match result {
            Ok(Ok(())) => (true, "ok".to_string()),
            Ok(Err(detail)) => (false, detail),
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "check panicked".to_string()
                };
                (false, format!("panic: {}", message))
            }
        };
        if passed {
            passed_count += 1;
        } else {
            failed_count += 1;
        }
        debug!(case = %case.name, passed, %detail, "self-test case finished");
        reports.push(CaseReport {
            name: case.name.clone(),
            passed,
            detail,
        });
    }

    let report = SuiteReport {
        cases: reports,
        passed_count,
        failed_count,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        passed = report.passed_count,
        failed = report.failed_count,
        elapsed_ms = report.elapsed_ms,
        "self-test suite finished"
    );
    report
}

/// The default suite: structural correctness for every built-in
/// routine plus engine-level restoration and cross-mode checks.
pub fn default_suite(engine: &Engine) -> Vec<SelfTestCase> {
    let mut cases = Vec::new();

    for algo in engine.algorithms() {
        match algo.family {
            Family::Sorting => {
                let id: &'static str = algo.id;
                cases.push(SelfTestCase::new(
                    format!("{} sorts ascending and preserves values", id),
                    move |engine| check_sorting(engine, id),
                ));
            }
            Family::Searching | Family::Graph => {}
        }
    }

    cases.push(SelfTestCase::new(
        "bubble-sort counters on [3,1,2]",
        check_bubble_counters,
    ));
    cases.push(SelfTestCase::new(
        "binary-search finds the middle value",
        check_binary_search,
    ));
    cases.push(SelfTestCase::new(
        "binary-search rejects unsorted input",
        check_binary_search_rejects_unsorted,
    ));
    cases.push(SelfTestCase::new(
        "breadth-first matches reference traversal",
        check_breadth_first,
    ));
    cases.push(SelfTestCase::new(
        "headless run restores the ambient context",
        check_ambient_restoration,
    ));
    cases.push(SelfTestCase::new(
        "benchmark and self-test modes agree",
        check_cross_mode_equivalence,
    ));

    cases
}

/// Convenience: run the default suite.
pub fn run_default_suite(engine: &Engine) -> SuiteReport {
    let cases = default_suite(engine);
    run_suite(engine, &cases)
}

// ---- individual checks ----

fn expect(condition: bool, detail: impl Into<String>) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(detail.into())
    }
}

/// Adversarial array inputs every sorting routine must handle.
fn sort_fixtures() -> Vec<Vec<i64>> {
    let random = match Dataset::random_array(32, 0xA15) {
        Dataset::Array(a) => a.values().to_vec(),
        Dataset::Graph(_) => Vec::new(),
    };
    vec![
        vec![],
        vec![7],
        vec![1, 2, 3, 4, 5],
        vec![5, 4, 3, 2, 1],
        vec![5, 1, 5, 1, 5, 1],
        vec![3, 1, 2],
        random,
    ]
}

fn run_headless(engine: &Engine, id: &str, dataset: Dataset) -> Result<RunOutcome, String> {
    engine
        .run(id, ExecMode::SelfTest, dataset, 50)
        .map_err(|e| format!("{}: could not start: {}", id, e))
}

fn check_sorting(engine: &Engine, id: &str) -> Result<(), String> {
    for input in sort_fixtures() {
        let outcome = run_headless(engine, id, Dataset::from_values(input.clone()))?;
        expect(
            outcome.metrics.is_done(),
            format!(
                "{} on {:?}: status {} ({})",
                id,
                input,
                outcome.metrics.status,
                outcome.metrics.error_message.as_deref().unwrap_or("-")
            ),
        )?;
        let output = outcome
            .dataset
            .as_array()
            .ok_or_else(|| format!("{}: output dataset is not an array", id))?;
        expect(
            output.is_sorted_ascending(),
            format!("{} on {:?}: output {:?} not sorted", id, input, output.values()),
        )?;
        let mut expected = input.clone();
        expected.sort_unstable();
        let mut got = output.values().to_vec();
        got.sort_unstable();
        expect(
            got == expected,
            format!("{} on {:?}: output is not a permutation of the input", id, input),
        )?;
    }
    Ok(())
}

fn check_bubble_counters(engine: &Engine) -> Result<(), String> {
    let outcome = run_headless(engine, "bubble-sort", Dataset::from_values(vec![3, 1, 2]))?;
    let counters = outcome.metrics.counters;
    expect(
        counters.comparisons == 3,
        format!("expected 3 comparisons, got {}", counters.comparisons),
    )?;
    expect(
        counters.swaps == 2,
        format!("expected 2 swaps, got {}", counters.swaps),
    )
}

fn check_binary_search(engine: &Engine) -> Result<(), String> {
    let input = vec![1, 3, 5, 7, 9, 11, 13];
    let target = input[input.len() / 2];
    let outcome = run_headless(engine, "binary-search", Dataset::from_values(input))?;
    expect(
        outcome.metrics.is_done(),
        format!("status {}", outcome.metrics.status),
    )?;
    let output = outcome
        .dataset
        .as_array()
        .ok_or_else(|| "output dataset is not an array".to_string())?;
    let found = (0..output.len()).find(|&i| output.tag(i) == Tag::Visited);
    match found {
        Some(i) => expect(
            output.get(i) == Some(target),
            format!("found index {} does not hold the target {}", i, target),
        ),
        None => Err("no element tagged as found".to_string()),
    }
}

fn check_binary_search_rejects_unsorted(engine: &Engine) -> Result<(), String> {
    let outcome = run_headless(engine, "binary-search", Dataset::from_values(vec![9, 1, 5]))?;
    expect(
        outcome.metrics.is_failed(),
        format!("expected failed status, got {}", outcome.metrics.status),
    )
}

/// Pure reference traversal, written independently of the routine.
fn reference_bfs(graph: &GraphData) -> Vec<usize> {
    let mut order = Vec::new();
    let mut seen = vec![false; graph.node_count()];
    let mut queue = std::collections::VecDeque::new();
    if graph.node_count() > 0 {
        seen[0] = true;
        queue.push_back(0usize);
    }
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in graph.neighbors(node) {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    order
}

fn check_breadth_first(engine: &Engine) -> Result<(), String> {
    let dataset = Dataset::sample_graph(12, 0xBF5);
    let reference = match &dataset {
        Dataset::Graph(g) => reference_bfs(g),
        Dataset::Array(_) => Vec::new(),
    };
    let outcome = run_headless(engine, "breadth-first", dataset)?;
    expect(
        outcome.metrics.is_done(),
        format!("status {}", outcome.metrics.status),
    )?;
    let graph = outcome
        .dataset
        .as_graph()
        .ok_or_else(|| "output dataset is not a graph".to_string())?;
    expect(
        graph.visit_order() == reference.as_slice(),
        format!(
            "visit order {:?} differs from reference {:?}",
            graph.visit_order(),
            reference
        ),
    )
}

fn check_ambient_restoration(engine: &Engine) -> Result<(), String> {
    let before = engine.ambient();
    let _ = run_headless(engine, "bubble-sort", Dataset::from_values(vec![2, 1]))?;
    let after = engine.ambient();
    let restored = match (&before, &after) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    };
    expect(restored, "ambient context changed across a nested run")
}

fn check_cross_mode_equivalence(engine: &Engine) -> Result<(), String> {
    let input = Dataset::random_array(24, 0xEC);
    let bench = engine
        .run("insertion-sort", ExecMode::Benchmark, input.clone(), 50)
        .map_err(|e| e.to_string())?;
    let verify = engine
        .run("insertion-sort", ExecMode::SelfTest, input, 50)
        .map_err(|e| e.to_string())?;
    expect(
        bench.metrics.status == verify.metrics.status,
        format!(
            "statuses differ: {} vs {}",
            bench.metrics.status, verify.metrics.status
        ),
    )?;
    expect(
        bench.dataset == verify.dataset,
        "final datasets differ between benchmark and self-test modes",
    )?;
    expect(
        bench.metrics.counters == verify.metrics.counters,
        "counters differ between benchmark and self-test modes",
    )
}
