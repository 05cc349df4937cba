use std::io::{self, Error, ErrorKind};
use std::time::Duration;
use std::{env, fs};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::fasttimer;
use crate::report::{self, WorkloadReport};
use crate::stats::trial_stats::TrialStats;
use crate::suites::{self, Workload};

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchmarkSettings {
    #[serde(
        rename = "AccessIterations",
        default = "default_access_iterations",
        deserialize_with = "validate_positive_u32"
    )]
    pub access_iterations: u32,
    #[serde(
        rename = "FibDepth",
        default = "default_fib_depth",
        deserialize_with = "validate_positive_u32"
    )]
    pub fib_depth: u32,
    #[serde(
        rename = "TreeDepth",
        default = "default_tree_depth",
        deserialize_with = "validate_positive_u32"
    )]
    pub tree_depth: u32,
    #[serde(
        rename = "TreeIterations",
        default = "default_tree_iterations",
        deserialize_with = "validate_positive_u32"
    )]
    pub tree_iterations: u32,
    #[serde(
        rename = "ListIterations",
        default = "default_list_iterations",
        deserialize_with = "validate_positive_u32"
    )]
    pub list_iterations: u32,
    #[serde(
        rename = "InnerLoopIterations",
        default = "default_inner_loop_iterations",
        deserialize_with = "validate_positive_u32"
    )]
    pub inner_loop_iterations: u32,
    #[serde(
        rename = "TrialRuns",
        default = "default_trial_runs",
        deserialize_with = "validate_positive_u32"
    )]
    pub trial_runs: u32,
    #[serde(
        rename = "WorkloadTimeoutSecs",
        default = "default_workload_timeout",
        deserialize_with = "validate_positive_u64"
    )]
    pub workload_timeout_secs: u64,
    #[serde(rename = "Suites", default = "default_suites")]
    pub suites: Vec<String>,
    #[serde(rename = "CsvPath", default = "default_csv_path")]
    pub csv_path: String,
    #[serde(rename = "ChartPath", default = "default_chart_path")]
    pub chart_path: String,
}

// The defaults are the counts the original benchmark scripts hardcode.
fn default_access_iterations() -> u32 {
    1_000_000
}
fn default_fib_depth() -> u32 {
    30
}
fn default_tree_depth() -> u32 {
    16
}
fn default_tree_iterations() -> u32 {
    10
}
fn default_list_iterations() -> u32 {
    100_000
}
fn default_inner_loop_iterations() -> u32 {
    100
}
fn default_trial_runs() -> u32 {
    10
}
fn default_workload_timeout() -> u64 {
    120
}
fn default_suites() -> Vec<String> {
    ["access", "fib", "tree", "list", "inner-loop"]
        .map(String::from)
        .to_vec()
}
fn default_csv_path() -> String {
    "results.csv".to_string()
}
fn default_chart_path() -> String {
    "results.svg".to_string()
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            access_iterations: default_access_iterations(),
            fib_depth: default_fib_depth(),
            tree_depth: default_tree_depth(),
            tree_iterations: default_tree_iterations(),
            list_iterations: default_list_iterations(),
            inner_loop_iterations: default_inner_loop_iterations(),
            trial_runs: default_trial_runs(),
            workload_timeout_secs: default_workload_timeout(),
            suites: default_suites(),
            csv_path: default_csv_path(),
            chart_path: default_chart_path(),
        }
    }
}

fn validate_positive_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u32::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

fn validate_positive_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u64::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

const SETTINGS_FILE: &str = "appsettings.json";

/// A missing settings file falls back to the built-in defaults; a present
/// but invalid one is an error.
fn load_settings() -> io::Result<BenchmarkSettings> {
    match fs::read_to_string(SETTINGS_FILE) {
        Ok(content) => {
            serde_json::from_str(&content).map_err(|e| Error::new(ErrorKind::InvalidData, e))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(BenchmarkSettings::default()),
        Err(e) => Err(e),
    }
}

// ============================================================================
// SYSTEM INFORMATION
// ============================================================================

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn cpu_brand(system: &sysinfo::System) -> String {
    let cpuid = raw_cpuid::CpuId::new();
    if let Some(brand) = cpuid.get_processor_brand_string() {
        return brand.as_str().trim().to_string();
    }
    fallback_cpu_brand(system)
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn cpu_brand(system: &sysinfo::System) -> String {
    fallback_cpu_brand(system)
}

fn fallback_cpu_brand(system: &sysinfo::System) -> String {
    system
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

// ============================================================================
// BENCHMARK RUNNER
// ============================================================================

fn run_workload(mut workload: Workload) -> Result<Vec<f64>, fasttimer::TimerError> {
    let mut samples = Vec::with_capacity(workload.trials as usize);
    for _ in 0..workload.trials {
        samples.push(fasttimer::timeit(&mut *workload.body, workload.iterations)?);
    }
    Ok(samples)
}

pub async fn run_benchmark() -> io::Result<()> {
    let separator = "=".repeat(60);

    // Title block
    println!("\n{}", separator);
    println!("{:^60}", "Variable Access Micro-Benchmarks".bold().cyan());
    println!("{}\n", separator);

    // System information block
    println!("{}", "SYSTEM INFORMATION".bold().yellow());
    println!("━━━━━━━━━━━━━━━━━━━");
    println!("▸ Working directory: {}", env::current_dir()?.display());
    let info = os_info::get();
    println!("▸ OS: {} {}", info.os_type(), info.version());
    let system = sysinfo::System::new_all();
    println!("▸ CPU: {}", cpu_brand(&system));
    println!("▸ Logical CPUs: {}", system.cpus().len());
    println!(
        "▸ Total memory: {:.1} GiB",
        system.total_memory() as f64 / (1024.0 * 1024.0 * 1024.0)
    );
    println!();

    // Configuration block
    println!("{}", "CONFIGURATION".bold().yellow());
    println!("━━━━━━━━━━━━━━");
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", "❌ Configuration Error:".bold().red(), e);
            return Err(e);
        }
    };
    println!("▸ Suites: {}", settings.suites.join(", "));
    println!("▸ Access iterations: {}", settings.access_iterations);
    println!("▸ Trial runs: {}", settings.trial_runs);
    println!("▸ Workload timeout: {}s", settings.workload_timeout_secs);
    println!();

    // Timer backend block: which tier the fast-timer selected for this
    // process. Selection happens once, here, and fails fast.
    println!("{}", "TIMER BACKEND".bold().yellow());
    println!("━━━━━━━━━━━━━━");
    match fasttimer::backend() {
        Ok(fasttimer::Backend::Compiled) => {
            println!("   ✓ compiled timing loop (in-process)");
        }
        Ok(fasttimer::Backend::Dynamic) => match fasttimer::library_path() {
            Some(path) => println!("   ✓ dynamic fallback: {}", path.display()),
            None => println!("   ✓ dynamic fallback"),
        },
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".bold().red(), e);
            eprintln!("   Build the fasttimer-shim library or enable the compiled-timer feature.");
            return Err(Error::new(ErrorKind::NotFound, e));
        }
    }
    println!();

    let built_suites = suites::build(&settings).map_err(|e| {
        eprintln!("{} {}", "❌ Configuration Error:".bold().red(), e);
        e
    })?;

    let total: u64 = built_suites
        .iter()
        .map(|suite| suite.workloads.len() as u64)
        .sum();
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} workloads {wide_msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut reports = Vec::new();
    for suite in built_suites {
        pb.println(format!("{}", suite.name.bold().yellow()));
        for workload in suite.workloads {
            let label = workload.name.clone();
            let iterations = workload.iterations;
            let trials = workload.trials;
            pb.set_message(label.clone());

            let outcome = timeout(
                Duration::from_secs(settings.workload_timeout_secs),
                tokio::task::spawn_blocking(move || run_workload(workload)),
            )
            .await;

            let samples = match outcome {
                Ok(Ok(Ok(samples))) => samples,
                Ok(Ok(Err(e))) => {
                    pb.finish_and_clear();
                    eprintln!("{} timer failed on {}: {}", "❌ Error:".bold().red(), label, e);
                    return Err(Error::new(ErrorKind::Other, e));
                }
                Ok(Err(e)) => {
                    pb.finish_and_clear();
                    eprintln!("{} workload {} panicked: {}", "❌ Error:".bold().red(), label, e);
                    return Err(Error::new(ErrorKind::Other, e));
                }
                Err(_) => {
                    pb.finish_and_clear();
                    eprintln!(
                        "{} workload {} exceeded {}s",
                        "❌ Error:".bold().red(),
                        label,
                        settings.workload_timeout_secs
                    );
                    return Err(Error::new(ErrorKind::TimedOut, "workload timeout"));
                }
            };

            let stats = TrialStats::from_samples(&samples);
            // Same shape the original scripts print: duration, then label.
            pb.println(format!("{:.6} {}", stats.best, label));
            reports.push(WorkloadReport {
                suite: suite.name.to_string(),
                workload: label,
                iterations,
                trials,
                stats,
            });
            pb.inc(1);
        }
    }
    pb.finish_with_message("all workloads completed");

    // Summary block
    println!("\n{}", "SUMMARY".bold().yellow());
    println!("━━━━━━━━");
    report::print_summary(&reports);

    report::write_csv(&settings.csv_path, &reports)?;
    println!("✓ Results written to {}", settings.csv_path);
    report::render_chart(&settings.chart_path, &reports)?;
    println!("✓ Chart written to {}", settings.chart_path);

    println!("\n{}", "✅ Benchmark complete".bold().green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::BenchmarkSettings;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings: BenchmarkSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.access_iterations, 1_000_000);
        assert_eq!(settings.fib_depth, 30);
        assert_eq!(settings.trial_runs, 10);
        assert_eq!(settings.suites.len(), 5);
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(serde_json::from_str::<BenchmarkSettings>(r#"{"AccessIterations": 0}"#).is_err());
        assert!(serde_json::from_str::<BenchmarkSettings>(r#"{"TrialRuns": -3}"#).is_err());
    }

    #[test]
    fn pascal_case_keys_are_honored() {
        let settings: BenchmarkSettings =
            serde_json::from_str(r#"{"FibDepth": 25, "Suites": ["fib"]}"#).unwrap();
        assert_eq!(settings.fib_depth, 25);
        assert_eq!(settings.suites, ["fib"]);
    }
}
