//! In-process timing loop, the primary tier.

use std::time::Instant;

/// `inline(never)` keeps the indirect call opaque to the optimizer, so every
/// workload pays the same dispatch cost the dynamic tier pays.
#[inline(never)]
pub(super) fn run(callable: &mut dyn FnMut(), number: u32) -> f64 {
    let started = Instant::now();
    for _ in 0..number {
        callable();
    }
    started.elapsed().as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn counts_and_stays_non_negative() {
        let mut calls = 0u64;
        let elapsed = run(&mut || calls += 1, 10_000);
        assert_eq!(calls, 10_000);
        assert!(elapsed >= 0.0);
    }
}
