//! SVG bar chart of per-call cost. Log scale, since the workloads span
//! nanoseconds to whole seconds.

use std::io::{self, Error, ErrorKind};

use plotters::prelude::*;

use super::WorkloadReport;

const BAR_HEIGHT: u32 = 36;
const FLOOR_NS: f64 = 0.1;

pub fn render_chart(path: &str, reports: &[WorkloadReport]) -> io::Result<()> {
    if reports.is_empty() {
        return Ok(());
    }

    let height = BAR_HEIGHT * reports.len() as u32 + 120;
    let root = SVGBackend::new(path, (960, height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let max_ns = reports
        .iter()
        .map(|r| r.per_call_nanos())
        .fold(1.0f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Per-call cost (best of trials)", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(200)
        .build_cartesian_2d(
            (FLOOR_NS..max_ns * 2.0).log_scale(),
            0.0..reports.len() as f64,
        )
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(reports.len())
        .y_label_formatter(&|y: &f64| {
            let idx = y.floor() as usize;
            reports
                .get(idx)
                .map(|r| r.workload.clone())
                .unwrap_or_default()
        })
        .x_desc("nanoseconds per call (log scale)")
        .draw()
        .map_err(draw_error)?;

    chart
        .draw_series(reports.iter().enumerate().map(|(idx, report)| {
            let y0 = idx as f64 + 0.15;
            let y1 = idx as f64 + 0.85;
            let value = report.per_call_nanos().max(FLOOR_NS);
            Rectangle::new([(FLOOR_NS, y0), (value, y1)], BLUE.mix(0.6).filled())
        }))
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

fn draw_error<E: std::fmt::Debug>(e: E) -> Error {
    Error::new(ErrorKind::Other, format!("chart rendering failed: {e:?}"))
}
