// Criterion benchmarks for headless engine runs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use algostep::dataset::Dataset;
use algostep::engine::{Engine, ExecMode};

fn bench_headless_sorts(c: &mut Criterion) {
    let engine = Engine::new();
    let input = Dataset::random_array(256, 0xBE);

    let mut group = c.benchmark_group("headless_sort_256");
    for id in ["bubble-sort", "insertion-sort", "selection-sort"] {
        group.bench_function(id, |b| {
            b.iter(|| {
                let outcome = engine
                    .run(id, ExecMode::Benchmark, black_box(input.clone()), 50)
                    .expect("run failed");
                assert!(outcome.metrics.is_done());
                black_box(outcome.metrics.counters)
            })
        });
    }
    group.finish();
}

fn bench_suspension_point_overhead(c: &mut Criterion) {
    let engine = Engine::new();
    // Sorted input: bubble sort bails after one pass, so this mostly
    // measures context setup plus suspension-point checks.
    let sorted = Dataset::from_values((0i64..1024).collect());

    c.bench_function("headless_suspend_path", |b| {
        b.iter(|| {
            let outcome = engine
                .run(
                    "bubble-sort",
                    ExecMode::Benchmark,
                    black_box(sorted.clone()),
                    50,
                )
                .expect("run failed");
            black_box(outcome.metrics.counters.comparisons)
        })
    });
}

criterion_group!(benches, bench_headless_sorts, bench_suspension_point_overhead);
criterion_main!(benches);
