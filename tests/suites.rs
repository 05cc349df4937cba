//! Every workload in every suite must run cleanly end to end.

use fasttimer_benchmark::core::BenchmarkSettings;
use fasttimer_benchmark::fasttimer;
use fasttimer_benchmark::suites;

fn tiny_settings() -> BenchmarkSettings {
    BenchmarkSettings {
        access_iterations: 50,
        fib_depth: 12,
        tree_depth: 4,
        tree_iterations: 3,
        list_iterations: 200,
        inner_loop_iterations: 2,
        trial_runs: 2,
        ..BenchmarkSettings::default()
    }
}

#[test]
fn all_suites_run_end_to_end() {
    let settings = tiny_settings();
    let built = suites::build(&settings).unwrap();
    assert_eq!(built.len(), 5);
    for mut suite in built {
        for workload in &mut suite.workloads {
            for _ in 0..workload.trials {
                let elapsed = fasttimer::timeit(&mut *workload.body, workload.iterations)
                    .unwrap_or_else(|e| panic!("{} failed: {e}", workload.name));
                assert!(elapsed >= 0.0, "{} reported {elapsed}", workload.name);
            }
        }
    }
}

#[test]
fn access_suite_has_the_thirteen_patterns() {
    let suite = suites::build(&tiny_settings()).unwrap().remove(0);
    let names: Vec<_> = suite.workloads.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "read_local",
            "read_captured",
            "read_global",
            "read_builtin",
            "read_classvar",
            "read_instancevar",
            "read_unboundmethod",
            "read_boundmethod",
            "write_local",
            "write_captured",
            "write_global",
            "write_classvar",
            "write_instancevar",
        ]
    );
}

#[test]
fn suite_order_follows_the_configuration() {
    let mut settings = tiny_settings();
    settings.suites = vec!["list".to_string(), "fib".to_string()];
    let built = suites::build(&settings).unwrap();
    let names: Vec<_> = built.iter().map(|s| s.name).collect();
    assert_eq!(names, ["list", "fib"]);
}

#[test]
fn unknown_suite_names_are_rejected() {
    let mut settings = tiny_settings();
    settings.suites = vec!["frobnicate".to_string()];
    assert!(suites::build(&settings).is_err());
}
