//! Small shared formatting helpers.

/// Format a duration in seconds with an adaptive unit.
pub fn format_seconds(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("{:.3} s", seconds)
    } else if seconds >= 1e-3 {
        format!("{:.3} ms", seconds * 1e3)
    } else if seconds >= 1e-6 {
        format!("{:.3} µs", seconds * 1e6)
    } else {
        format!("{:.1} ns", seconds * 1e9)
    }
}

/// Average cost of one invocation, in nanoseconds.
pub fn per_call_nanos(total_seconds: f64, iterations: u32) -> f64 {
    if iterations == 0 {
        return 0.0;
    }
    total_seconds * 1e9 / f64::from(iterations)
}

#[cfg(test)]
mod tests {
    use super::{format_seconds, per_call_nanos};

    #[test]
    fn picks_an_adaptive_unit() {
        assert_eq!(format_seconds(2.5), "2.500 s");
        assert_eq!(format_seconds(0.0042), "4.200 ms");
        assert_eq!(format_seconds(0.0000042), "4.200 µs");
        assert_eq!(format_seconds(0.0000000042), "4.2 ns");
    }

    #[test]
    fn per_call_cost() {
        assert_eq!(per_call_nanos(1.0, 1_000_000), 1000.0);
        assert_eq!(per_call_nanos(1.0, 0), 0.0);
    }
}
