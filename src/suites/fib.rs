//! Naive doubly-recursive Fibonacci, one deep invocation.

use std::hint::black_box;

use super::{Suite, Workload};

fn fib(n: u32) -> u64 {
    if n < 2 {
        return u64::from(n);
    }
    fib(n - 2) + fib(n - 1)
}

pub fn suite(depth: u32) -> Suite {
    let workload = Workload::new(format!("fib({depth})"), 1, 1, move || {
        black_box(fib(black_box(depth)));
    });
    Suite {
        name: "fib",
        workloads: vec![workload],
    }
}

#[cfg(test)]
mod tests {
    use super::fib;

    #[test]
    fn known_values() {
        assert_eq!(fib(0), 0);
        assert_eq!(fib(1), 1);
        assert_eq!(fib(10), 55);
        assert_eq!(fib(20), 6765);
    }
}
