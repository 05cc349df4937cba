//! Native timing shim loaded by the benchmark's dynamic fallback path.
//!
//! Building the workspace drops `libfasttimer_shim.so` (or the platform
//! equivalent) next to the binaries, which is where the fallback loader
//! probes for it.

use std::os::raw::c_int;
use std::time::Instant;

/// Runs `callback` back-to-back `number` times and returns the elapsed
/// wall-clock seconds.
///
/// A null callback or a non-positive count performs no iterations.
///
/// # Safety
///
/// `callback`, when non-null, must be a valid function pointer that does not
/// unwind across this call.
#[no_mangle]
pub unsafe extern "C" fn timeit(callback: Option<unsafe extern "C" fn()>, number: c_int) -> f64 {
    let callback = match callback {
        Some(callback) => callback,
        None => return 0.0,
    };

    let started = Instant::now();
    for _ in 0..number.max(0) {
        callback();
    }
    started.elapsed().as_secs_f64()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::timeit;

    static HITS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn bump() {
        HITS.fetch_add(1, Ordering::Relaxed);
    }

    static IDLE_HITS: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn bump_idle() {
        IDLE_HITS.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn runs_the_callback_exactly_count_times() {
        let elapsed = unsafe { timeit(Some(bump as unsafe extern "C" fn()), 1000) };
        assert_eq!(HITS.load(Ordering::Relaxed), 1000);
        assert!(elapsed >= 0.0);
    }

    #[test]
    fn null_callback_reports_zero() {
        assert_eq!(unsafe { timeit(None, 1000) }, 0.0);
    }

    #[test]
    fn non_positive_counts_run_nothing() {
        let elapsed = unsafe { timeit(Some(bump_idle as unsafe extern "C" fn()), 0) };
        assert_eq!(IDLE_HITS.load(Ordering::Relaxed), 0);
        assert!(elapsed >= 0.0);

        let elapsed = unsafe { timeit(Some(bump_idle as unsafe extern "C" fn()), -5) };
        assert_eq!(IDLE_HITS.load(Ordering::Relaxed), 0);
        assert!(elapsed >= 0.0);
    }
}
