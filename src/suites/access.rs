//! Relative costs of variable-access patterns: local, closure-captured,
//! global/static, built-in function reference, type-level constant, instance
//! field, and bound/unbound methods.
//!
//! Each body performs 25 accesses in a 5x5 grid, routed through
//! `std::hint::black_box` so the accesses survive optimization.

use std::hint::black_box;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{Suite, Workload};

macro_rules! times25 {
    ($e:expr) => {{
        $e; $e; $e; $e; $e;
        $e; $e; $e; $e; $e;
        $e; $e; $e; $e; $e;
        $e; $e; $e; $e; $e;
        $e; $e; $e; $e; $e;
    }};
}

static V_GLOBAL: AtomicI64 = AtomicI64::new(1);

// Writable class-level slot; associated consts are read-only, so class
// writes go through a static beside the type.
static PROBE_CLASS_SLOT: AtomicI64 = AtomicI64::new(1);

struct Probe {
    x: i64,
}

impl Probe {
    const X: i64 = 1;

    fn m(&self) {}
}

pub fn suite(iterations: u32) -> Suite {
    let mut workloads = Vec::new();

    workloads.push(Workload::new("read_local", iterations, 1, || {
        let v_local = black_box(1i64);
        times25!(black_box(v_local));
    }));

    let v_captured = black_box(1i64);
    workloads.push(Workload::new("read_captured", iterations, 1, move || {
        times25!(black_box(v_captured));
    }));

    workloads.push(Workload::new("read_global", iterations, 1, || {
        times25!(black_box(V_GLOBAL.load(Ordering::Relaxed)));
    }));

    workloads.push(Workload::new("read_builtin", iterations, 1, || {
        times25!(black_box(i64::swap_bytes as fn(i64) -> i64));
    }));

    workloads.push(Workload::new("read_classvar", iterations, 1, || {
        times25!(black_box(Probe::X));
    }));

    let probe = Probe { x: black_box(1) };
    workloads.push(Workload::new("read_instancevar", iterations, 1, move || {
        times25!(black_box(probe.x));
    }));

    workloads.push(Workload::new("read_unboundmethod", iterations, 1, || {
        times25!(black_box(Probe::m as fn(&Probe)));
    }));

    let probe = Probe { x: black_box(1) };
    workloads.push(Workload::new("read_boundmethod", iterations, 1, move || {
        // Binds the receiver on every access, like taking `a.m`.
        times25!(black_box(|| probe.m()));
    }));

    workloads.push(Workload::new("write_local", iterations, 1, || {
        let mut v_local = 1i64;
        times25!(v_local = black_box(1));
        black_box(v_local);
    }));

    let mut v_captured = 1i64;
    workloads.push(Workload::new("write_captured", iterations, 1, move || {
        times25!(v_captured = black_box(1));
        black_box(v_captured);
    }));

    workloads.push(Workload::new("write_global", iterations, 1, || {
        times25!(V_GLOBAL.store(1, Ordering::Relaxed));
    }));

    workloads.push(Workload::new("write_classvar", iterations, 1, || {
        times25!(PROBE_CLASS_SLOT.store(1, Ordering::Relaxed));
    }));

    let mut probe = Probe { x: 1 };
    workloads.push(Workload::new("write_instancevar", iterations, 1, move || {
        times25!(probe.x = black_box(1));
        black_box(probe.x);
    }));

    Suite {
        name: "access",
        workloads,
    }
}
