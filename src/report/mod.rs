//! Result reporting: summary table, CSV export, SVG chart.

mod chart;

pub use chart::render_chart;

use std::io::{self, Error, ErrorKind};

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::stats::trial_stats::TrialStats;
use crate::utils::helpers::{format_seconds, per_call_nanos};

#[derive(Debug, Clone)]
pub struct WorkloadReport {
    pub suite: String,
    pub workload: String,
    pub iterations: u32,
    pub trials: u32,
    pub stats: TrialStats,
}

impl WorkloadReport {
    pub fn per_call_nanos(&self) -> f64 {
        per_call_nanos(self.stats.best, self.iterations)
    }
}

pub fn print_summary(reports: &[WorkloadReport]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Suite", "Workload", "Iterations", "Trials", "Best", "Mean", "Per call",
        ]);
    for report in reports {
        table.add_row(vec![
            Cell::new(&report.suite),
            Cell::new(&report.workload),
            Cell::new(report.iterations).set_alignment(CellAlignment::Right),
            Cell::new(report.trials).set_alignment(CellAlignment::Right),
            Cell::new(format_seconds(report.stats.best)).set_alignment(CellAlignment::Right),
            Cell::new(format_seconds(report.stats.mean)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1} ns", report.per_call_nanos()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

#[derive(Serialize)]
struct CsvRow<'a> {
    suite: &'a str,
    workload: &'a str,
    iterations: u32,
    trials: u32,
    best_seconds: f64,
    mean_seconds: f64,
    worst_seconds: f64,
    per_call_ns: f64,
}

pub fn write_csv(path: &str, reports: &[WorkloadReport]) -> io::Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for report in reports {
        writer
            .serialize(CsvRow {
                suite: &report.suite,
                workload: &report.workload,
                iterations: report.iterations,
                trials: report.trials,
                best_seconds: report.stats.best,
                mean_seconds: report.stats.mean,
                worst_seconds: report.stats.worst,
                per_call_ns: report.per_call_nanos(),
            })
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> Error {
    Error::new(ErrorKind::Other, e)
}

#[cfg(test)]
mod tests {
    use super::WorkloadReport;
    use crate::stats::trial_stats::TrialStats;

    #[test]
    fn per_call_cost_uses_the_best_trial() {
        let report = WorkloadReport {
            suite: "list".to_string(),
            workload: "list_append_pop".to_string(),
            iterations: 100_000,
            trials: 10,
            stats: TrialStats::from_samples(&[0.02, 0.01]),
        };
        assert!((report.per_call_nanos() - 100.0).abs() < 1e-9);
    }
}
