// Value-preservation properties for every sorting routine

use algostep::dataset::Dataset;
use algostep::engine::{Engine, ExecMode};
use proptest::prelude::*;

const SORTING_IDS: [&str; 4] = [
    "bubble-sort",
    "insertion-sort",
    "selection-sort",
    "cocktail-sort",
];

proptest! {
    #[test]
    fn headless_output_is_a_sorted_permutation(
        input in prop::collection::vec(-1_000i64..1_000, 0..40)
    ) {
        let engine = Engine::new();
        for id in SORTING_IDS {
            let outcome = engine
                .run(id, ExecMode::SelfTest, Dataset::from_values(input.clone()), 50)
                .expect("run failed to start");
            prop_assert!(outcome.metrics.is_done(), "{}: {:?}", id, outcome.metrics);

            let array = outcome.dataset.as_array().expect("array output");
            prop_assert!(array.is_sorted_ascending(), "{} left {:?}", id, array.values());

            let mut expected = input.clone();
            expected.sort_unstable();
            let mut got = array.values().to_vec();
            got.sort_unstable();
            prop_assert_eq!(got, expected, "{} lost or invented values", id);
        }
    }
}

#[test]
fn bubble_sort_example_counters() {
    let engine = Engine::new();
    let outcome = engine
        .run(
            "bubble-sort",
            ExecMode::SelfTest,
            Dataset::from_values(vec![3, 1, 2]),
            50,
        )
        .expect("run failed to start");

    assert!(outcome.metrics.is_done());
    let array = outcome.dataset.as_array().expect("array output");
    assert_eq!(array.values(), &[1, 2, 3]);
    assert_eq!(outcome.metrics.counters.comparisons, 3);
    assert_eq!(outcome.metrics.counters.swaps, 2);
}

#[test]
fn benchmark_and_selftest_modes_produce_identical_results() {
    let engine = Engine::new();
    let input = Dataset::random_array(48, 0xC0FFEE);

    for id in SORTING_IDS {
        let bench = engine
            .run(id, ExecMode::Benchmark, input.clone(), 50)
            .expect("benchmark run failed to start");
        let verify = engine
            .run(id, ExecMode::SelfTest, input.clone(), 50)
            .expect("self-test run failed to start");

        assert_eq!(bench.metrics.status, verify.metrics.status, "{}", id);
        assert_eq!(bench.metrics.counters, verify.metrics.counters, "{}", id);
        assert_eq!(bench.dataset, verify.dataset, "{}", id);
    }
}
