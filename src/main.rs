// Algostep: cooperative execution engine for algorithm animation

use std::process;

use algostep::compare::{compare, ComparisonConfig};
use algostep::dataset::Dataset;
use algostep::engine::{Engine, ExecMode};
use algostep::selftest;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <command> [args]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                              List registered algorithms");
    eprintln!("  selftest                          Run the self-test suite");
    eprintln!("  run <id> [size]                   Run one algorithm headless");
    eprintln!("  compare <a> <b> [size] [rounds]   Benchmark two algorithms");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} selftest", program);
    eprintln!("  {} run bubble-sort 64", program);
    eprintln!("  {} compare bubble-sort insertion-sort 512 10", program);
    process::exit(1);
}

fn parse_or_exit(arg: &str, what: &str) -> usize {
    match arg.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: invalid {} '{}'", what, arg);
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(|s| s.as_str()).unwrap_or("algostep");

    if args.len() < 2 {
        usage(program);
    }

    let engine = Engine::new();

    match args[1].as_str() {
        "list" => {
            for algo in engine.algorithms() {
                println!(
                    "{:<16} {:<24} [{}]",
                    algo.id,
                    algo.name,
                    algo.family.label()
                );
            }
        }

        "selftest" => {
            let report = selftest::run_default_suite(&engine);
            for case in &report.cases {
                let mark = if case.passed { "PASS" } else { "FAIL" };
                println!("{}  {}", mark, case.name);
                if !case.passed {
                    println!("      {}", case.detail);
                }
            }
            println!(
                "{} passed, {} failed in {} ms",
                report.passed_count, report.failed_count, report.elapsed_ms
            );
            if !report.all_passed() {
                process::exit(1);
            }
        }

        "run" => {
            if args.len() < 3 {
                usage(program);
            }
            let id = &args[2];
            let size = args
                .get(3)
                .map(|s| parse_or_exit(s, "size"))
                .unwrap_or(64);

            let algo = match engine.lookup(id) {
                Ok(algo) => algo,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            let dataset = match algo.input {
                algostep::dataset::DatasetKind::Array => Dataset::random_array(size, 1),
                algostep::dataset::DatasetKind::Graph => Dataset::sample_graph(size, 1),
            };

            match engine.run(id, ExecMode::Benchmark, dataset, 50) {
                Ok(outcome) => {
                    let m = &outcome.metrics;
                    println!("status:      {}", m.status);
                    if let Some(message) = &m.error_message {
                        println!("message:     {}", message);
                    }
                    println!("comparisons: {}", m.counters.comparisons);
                    println!("swaps:       {}", m.counters.swaps);
                    println!("operations:  {}", m.counters.operations);
                    println!("accesses:    {} (est. {})", m.counters.accesses, m.estimated_accesses());
                    println!("elapsed:     {:?}", m.elapsed);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }

        "compare" => {
            if args.len() < 4 {
                usage(program);
            }
            let config = ComparisonConfig {
                size: args
                    .get(4)
                    .map(|s| parse_or_exit(s, "size"))
                    .unwrap_or(256),
                rounds: args
                    .get(5)
                    .map(|s| parse_or_exit(s, "rounds"))
                    .unwrap_or(10),
                seed: 0,
            };

            match compare(&engine, &args[2], &args[3], &config) {
                Ok(report) => {
                    println!(
                        "{} rounds over arrays of {} elements",
                        report.rounds, report.size
                    );
                    for stats in [&report.a, &report.b] {
                        println!(
                            "{:<16} mean {:?}  median {:?}  best {:?}  cmp {:.1}  swaps {:.1}",
                            stats.id,
                            stats.mean_elapsed,
                            stats.median_elapsed,
                            stats.best_elapsed,
                            stats.mean_comparisons,
                            stats.mean_swaps
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Error: comparison aborted: {}", e);
                    process::exit(1);
                }
            }
        }

        _ => usage(program),
    }
}
