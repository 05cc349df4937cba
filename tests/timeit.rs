//! End-to-end contract tests for the fast-timer utility.

use std::cell::Cell;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};

use fasttimer_benchmark::timeit;

fn busy_work(units: u32) -> u64 {
    let mut acc = 0u64;
    for i in 0..units {
        acc = acc.wrapping_add(black_box(u64::from(i)));
    }
    acc
}

#[test]
fn durations_are_non_negative() {
    for count in [0u32, 1, 10, 1_000] {
        let elapsed = timeit(
            || {
                black_box(busy_work(8));
            },
            count,
        )
        .unwrap();
        assert!(elapsed >= 0.0, "count {count} produced {elapsed}");
    }
}

#[test]
fn zero_iterations_skip_the_callable() {
    let calls = Cell::new(0u32);
    let elapsed = timeit(|| calls.set(calls.get() + 1), 0).unwrap();
    assert_eq!(calls.get(), 0);
    assert!(elapsed < 0.01, "zero iterations took {elapsed}s");
}

#[test]
fn doubling_the_count_roughly_doubles_the_duration() {
    let n = 2_000u32;
    let best = |count: u32| -> f64 {
        (0..7)
            .map(|_| {
                timeit(
                    || {
                        black_box(busy_work(500));
                    },
                    count,
                )
                .unwrap()
            })
            .fold(f64::INFINITY, f64::min)
    };
    let single = best(n);
    let double = best(2 * n);
    let ratio = double / single;
    assert!(
        ratio > 1.2 && ratio < 4.0,
        "ratio was {ratio} ({single}s vs {double}s)"
    );
}

#[test]
fn a_panicking_callable_aborts_after_k_invocations() {
    let calls = Cell::new(0u32);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = timeit(
            || {
                calls.set(calls.get() + 1);
                if calls.get() == 3 {
                    panic::resume_unwind(Box::new("third invocation"));
                }
            },
            1_000,
        );
    }));
    let payload = outcome.expect_err("the unwind should escape timeit");
    assert_eq!(*payload.downcast_ref::<&str>().unwrap(), "third invocation");
    assert_eq!(calls.get(), 3);
}

#[test]
fn panic_on_the_first_call_propagates_instead_of_returning() {
    #[derive(Debug, Clone, Copy)]
    struct ValueError;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = timeit(|| panic::panic_any(ValueError), 1_000_000);
    }));
    let payload = outcome.expect_err("the unwind should escape timeit");
    assert!(payload.downcast_ref::<ValueError>().is_some());
}

#[test]
fn a_million_noops_stay_under_five_seconds() {
    let elapsed = timeit(|| {}, 1_000_000).unwrap();
    assert!(elapsed > 0.0);
    assert!(elapsed < 5.0, "1M no-op calls took {elapsed}s");
}

#[cfg(feature = "compiled-timer")]
#[test]
fn default_build_selects_the_compiled_backend() {
    use fasttimer_benchmark::{fasttimer, Backend};

    // This test binary runs without FASTTIMER_BACKEND set.
    assert_eq!(fasttimer::backend().unwrap(), Backend::Compiled);
}
