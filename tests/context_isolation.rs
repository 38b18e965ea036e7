// Ambient-context exclusivity and save/install/restore discipline

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use algostep::dataset::Dataset;
use algostep::engine::{Engine, ExecMode, RoutineError, RunScope, RunStatus};
use algostep::routines::{Algorithm, Family};

fn failing_routine(_: &RunScope) -> Result<(), RoutineError> {
    Err(RoutineError::fault("deliberately broken"))
}

#[test]
fn at_most_one_context_is_ambient() {
    let engine = Engine::new();
    assert!(engine.ambient().is_none());

    let run = engine
        .start("bubble-sort", Dataset::random_array(32, 2), 100)
        .expect("start failed");
    let ambient = engine.ambient().expect("a run is in flight");
    assert!(Arc::ptr_eq(&ambient, run.handle().context()));

    run.handle().cancel();
    run.wait();
    assert!(engine.ambient().is_none(), "slot must clear after the run");
}

#[test]
fn nested_benchmark_leaves_a_paused_interactive_run_untouched() {
    let engine = Engine::new();
    let run = engine
        .start("bubble-sort", Dataset::random_array(32, 11), 100)
        .expect("start failed");
    let handle = run.handle().clone();

    // Pause and let the routine block at its next suspension point.
    handle.pause();
    thread::sleep(Duration::from_millis(100));

    let outer_ctx = engine.ambient().expect("interactive run is ambient");
    let outer_flags = outer_ctx.flags();
    let outer_counters = handle.counters();
    let outer_dataset = handle.dataset();

    // Unrelated nested headless run over its own fresh context.
    let nested = engine
        .run(
            "insertion-sort",
            ExecMode::Benchmark,
            Dataset::random_array(128, 77),
            50,
        )
        .expect("benchmark start failed");
    assert_eq!(nested.metrics.status, RunStatus::Done);

    // The outer context is back, reference-identical and untouched.
    let restored = engine.ambient().expect("outer context restored");
    assert!(Arc::ptr_eq(&restored, &outer_ctx));
    let flags = restored.flags();
    assert_eq!(flags.paused, outer_flags.paused);
    assert_eq!(flags.stop_requested, outer_flags.stop_requested);
    assert_eq!(handle.counters(), outer_counters);
    assert_eq!(handle.dataset(), outer_dataset, "tags or values changed");

    // And it still completes normally afterwards.
    handle.resume();
    let outcome = run.wait();
    assert_eq!(outcome.metrics.status, RunStatus::Done);
    assert!(outcome.dataset.as_array().expect("array").is_sorted_ascending());
}

#[test]
fn restoration_holds_even_when_the_nested_run_fails() {
    let engine = Engine::new();
    engine.register(Algorithm {
        id: "broken",
        name: "Broken Routine",
        family: Family::Sorting,
        input: algostep::dataset::DatasetKind::Array,
        run: failing_routine,
    });

    let run = engine
        .start("selection-sort", Dataset::random_array(32, 4), 100)
        .expect("start failed");
    let handle = run.handle().clone();
    handle.pause();
    thread::sleep(Duration::from_millis(100));

    let outer_ctx = engine.ambient().expect("interactive run is ambient");

    let nested = engine
        .run(
            "broken",
            ExecMode::SelfTest,
            Dataset::from_values(vec![1, 2]),
            50,
        )
        .expect("nested start failed");
    assert_eq!(nested.metrics.status, RunStatus::Failed);
    assert_eq!(
        nested.metrics.error_message.as_deref(),
        Some("deliberately broken")
    );

    let restored = engine.ambient().expect("outer context restored");
    assert!(Arc::ptr_eq(&restored, &outer_ctx));

    handle.cancel();
    let outcome = run.wait();
    assert_eq!(outcome.metrics.status, RunStatus::Cancelled);
}

#[test]
fn sequential_headless_runs_are_fully_isolated() {
    let engine = Engine::new();
    let first = engine
        .run(
            "bubble-sort",
            ExecMode::Benchmark,
            Dataset::from_values(vec![3, 1, 2]),
            50,
        )
        .expect("first run failed");
    let second = engine
        .run(
            "bubble-sort",
            ExecMode::Benchmark,
            Dataset::from_values(vec![3, 1, 2]),
            50,
        )
        .expect("second run failed");

    // Fresh counters per run: identical input, identical totals.
    assert_eq!(first.metrics.counters, second.metrics.counters);
    assert_eq!(first.metrics.counters.comparisons, 3);
    assert_eq!(first.metrics.counters.swaps, 2);
}
