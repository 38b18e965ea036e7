// Self-test harness behavior: full suite, isolation of injected failures

use algostep::engine::Engine;
use algostep::selftest::{self, SelfTestCase};

#[test]
fn default_suite_passes_clean() {
    let engine = Engine::new();
    let report = selftest::run_default_suite(&engine);
    for case in &report.cases {
        assert!(case.passed, "{}: {}", case.name, case.detail);
    }
    assert_eq!(report.failed_count, 0);
    assert_eq!(report.passed_count, report.cases.len());
}

#[test]
fn injected_failures_are_isolated_and_counted() {
    let engine = Engine::new();
    let mut cases = selftest::default_suite(&engine);
    let clean_count = cases.len();

    // A case with a deliberately wrong expected value, wedged in the
    // middle so cases after it must still execute.
    cases.insert(
        clean_count / 2,
        SelfTestCase::new("wrong expectation", |_| {
            Err("expected 42 comparisons, got 3".to_string())
        }),
    );
    cases.push(SelfTestCase::new("panicking check", |_| {
        panic!("check blew up");
    }));
    cases.push(SelfTestCase::new("trailing healthy check", |_| Ok(())));

    let report = selftest::run_suite(&engine, &cases);

    assert_eq!(report.cases.len(), clean_count + 3, "every case must report");
    assert_eq!(report.failed_count, 2);
    assert_eq!(report.passed_count, clean_count + 1);

    let wrong = report
        .cases
        .iter()
        .find(|c| c.name == "wrong expectation")
        .expect("reported");
    assert!(!wrong.passed);
    assert_eq!(wrong.detail, "expected 42 comparisons, got 3");

    let panicked = report
        .cases
        .iter()
        .find(|c| c.name == "panicking check")
        .expect("reported");
    assert!(!panicked.passed);
    assert!(panicked.detail.contains("check blew up"));

    // The case after the panic still ran and passed.
    let trailing = report
        .cases
        .iter()
        .find(|c| c.name == "trailing healthy check")
        .expect("reported");
    assert!(trailing.passed);
}

#[test]
fn suite_covers_every_algorithm_family() {
    let engine = Engine::new();
    let cases = selftest::default_suite(&engine);
    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();

    assert!(names.iter().any(|n| n.contains("bubble-sort")));
    assert!(names.iter().any(|n| n.contains("binary-search")));
    assert!(names.iter().any(|n| n.contains("breadth-first")));
}
