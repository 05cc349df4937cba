//! Benchmark workloads: variable-access patterns plus a few classic
//! micro-benchmarks (recursive Fibonacci, tree construction, vector
//! push/pop, nested-loop exit strategies).

use std::io::{self, Error, ErrorKind};

use crate::core::BenchmarkSettings;

pub mod access;
pub mod fib;
pub mod inner_loop;
pub mod list;
pub mod tree;

/// One named benchmark body with its repetition plan. The body crosses a
/// `spawn_blocking` boundary in the runner, hence `Send`.
pub struct Workload {
    pub name: String,
    pub iterations: u32,
    pub trials: u32,
    pub body: Box<dyn FnMut() + Send>,
}

impl Workload {
    pub fn new(
        name: impl Into<String>,
        iterations: u32,
        trials: u32,
        body: impl FnMut() + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            iterations,
            trials,
            body: Box::new(body),
        }
    }
}

pub struct Suite {
    pub name: &'static str,
    pub workloads: Vec<Workload>,
}

/// Builds the suites named in the configuration, in configuration order.
pub fn build(settings: &BenchmarkSettings) -> io::Result<Vec<Suite>> {
    settings
        .suites
        .iter()
        .map(|name| match name.as_str() {
            "access" => Ok(access::suite(settings.access_iterations)),
            "fib" => Ok(fib::suite(settings.fib_depth)),
            "tree" => Ok(tree::suite(settings.tree_depth, settings.tree_iterations)),
            "list" => Ok(list::suite(settings.list_iterations, settings.trial_runs)),
            "inner-loop" => Ok(inner_loop::suite(
                settings.inner_loop_iterations,
                settings.trial_runs,
            )),
            other => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("unknown suite `{other}` (expected access, fib, tree, list or inner-loop)"),
            )),
        })
        .collect()
}
