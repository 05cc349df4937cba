//! Vector push/pop pair, reduced by best-of-trials.

use super::{Suite, Workload};

pub fn suite(iterations: u32, trials: u32) -> Suite {
    let mut items: Vec<i64> = Vec::new();
    let workload = Workload::new("list_append_pop", iterations, trials, move || {
        items.push(1);
        items.pop();
    });
    Suite {
        name: "list",
        workloads: vec![workload],
    }
}
