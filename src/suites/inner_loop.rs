//! Three ways out of a triply nested search loop: a labeled break, a helper
//! function's early return, and an unwind carrying the found value.

use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};

use super::{Suite, Workload};

const DIM: usize = 30;
const NEEDLE: i64 = 42;

/// 30x30x30 grid with the needle planted in the last cell.
fn grid() -> Vec<Vec<Vec<i64>>> {
    let mut xs: Vec<Vec<Vec<i64>>> = (0..DIM)
        .map(|_| (0..DIM).map(|_| (0..DIM as i64).collect()).collect())
        .collect();
    xs[DIM - 1][DIM - 1][DIM - 1] = NEEDLE;
    xs
}

struct FoundIt(i64);

fn scan(xs: &[Vec<Vec<i64>>]) -> Option<i64> {
    for ys in xs {
        for zs in ys {
            for &z in zs {
                if z == NEEDLE {
                    return Some(z);
                }
            }
        }
    }
    None
}

pub fn suite(iterations: u32, trials: u32) -> Suite {
    let mut workloads = Vec::new();

    let xs = grid();
    workloads.push(Workload::new("labeled_break", iterations, trials, move || {
        let mut found = 0;
        'search: for ys in &xs {
            for zs in ys {
                for &z in zs {
                    if z == NEEDLE {
                        found = z;
                        break 'search;
                    }
                }
            }
        }
        black_box(found);
    }));

    let xs = grid();
    workloads.push(Workload::new("helper_return", iterations, trials, move || {
        black_box(scan(&xs));
    }));

    let xs = grid();
    workloads.push(Workload::new("unwind_payload", iterations, trials, move || {
        // resume_unwind skips the panic hook, so thousands of control-flow
        // unwinds stay quiet on stderr.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            for ys in &xs {
                for zs in ys {
                    for &z in zs {
                        if z == NEEDLE {
                            panic::resume_unwind(Box::new(FoundIt(z)));
                        }
                    }
                }
            }
        }));
        if let Err(payload) = outcome {
            match payload.downcast::<FoundIt>() {
                Ok(found) => {
                    black_box(found.0);
                }
                Err(other) => panic::resume_unwind(other),
            }
        }
    }));

    Suite {
        name: "inner-loop",
        workloads,
    }
}
