//! Variable-access micro-benchmarks on top of a dual-path fast-timer.
//!
//! The piece with design substance is [`fasttimer`]: a callable-timing
//! utility that prefers an in-process compiled loop and falls back to
//! dynamically loading the `fasttimer-shim` library and bridging the
//! callable to its exported C symbol. The rest of the crate is the workload
//! suites and the runner that selects, times, and reports them.

pub mod core;
pub mod fasttimer;
pub mod report;
pub mod stats;
pub mod suites;
pub mod utils;

pub use crate::core::run_benchmark;
pub use crate::fasttimer::{timeit, Backend, TimerError, DEFAULT_NUMBER};

/// Library version
pub const VERSION: &str = "0.1.0";
