//! Bar charts rendered to PNG.
//!
//! Text needs a TrueType font. One is registered once per process from
//! `output.font_path` or the first readable entry of `FONT_CANDIDATES`.
//! Without one, charts are still written with bars only.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::prelude::*;

use super::{ensure_dir, ExportError};
use crate::config::defaults::{
    CHART_PARETO_FILE, CHART_RISK_LEVEL_FILE, CHART_TYPE_FILE, FONT_CANDIDATES,
};
use crate::config::OutputConfig;
use crate::types::{KpiReport, RiskSummary};

const FONT_FAMILY: &str = "sans-serif";
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// One categorical bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl BarChart {
    /// Failure rate (%) per risk level, Low -> Medium -> High. Empty levels plot as 0.
    pub fn risk_levels(risk: &RiskSummary) -> Self {
        Self {
            title: "Failure Rate by Risk Level".to_string(),
            y_label: "Failure rate (%)".to_string(),
            labels: risk.buckets.iter().map(|b| b.level.to_string()).collect(),
            values: risk
                .buckets
                .iter()
                .map(|b| b.failure_rate_pct.unwrap_or(0.0))
                .collect(),
        }
    }

    /// Share (%) of each failure mode, most frequent first.
    pub fn failure_modes(kpis: &KpiReport) -> Self {
        Self {
            title: "Pareto of Failure Modes".to_string(),
            y_label: "Share of failures (%)".to_string(),
            labels: kpis.failure_modes.iter().map(|m| m.mode.to_string()).collect(),
            values: kpis.failure_modes.iter().map(|m| m.share_pct).collect(),
        }
    }

    /// Failure rate (%) per product type, highest first.
    pub fn product_types(kpis: &KpiReport) -> Self {
        Self {
            title: "Failure Rate by Product Type".to_string(),
            y_label: "Failure rate (%)".to_string(),
            labels: kpis
                .failure_rate_by_type
                .iter()
                .map(|t| t.product_type.clone())
                .collect(),
            values: kpis
                .failure_rate_by_type
                .iter()
                .map(|t| t.failure_rate * 100.0)
                .collect(),
        }
    }

    fn y_max(&self) -> f64 {
        let max = self.values.iter().copied().fold(0.0_f64, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    /// Draw the chart into a `width` x `height` PNG at `path`.
    pub fn render(&self, path: &Path, size: (u32, u32), with_text: bool) -> Result<(), ExportError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| chart_error(path, &e))?;

        let n = u32::try_from(self.labels.len().max(1)).unwrap_or(u32::MAX);
        let mut builder = ChartBuilder::on(&root);
        builder.margin(20);
        if with_text {
            builder
                .caption(&self.title, (FONT_FAMILY, 28))
                .x_label_area_size(50)
                .y_label_area_size(70);
        }
        let mut chart = builder
            .build_cartesian_2d((0u32..n).into_segmented(), 0f64..self.y_max())
            .map_err(|e| chart_error(path, &e))?;

        if with_text {
            let labels = &self.labels;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc(self.y_label.as_str())
                .x_labels(labels.len().max(1))
                .x_label_formatter(&|v| match v {
                    SegmentValue::CenterOf(i) => usize::try_from(*i)
                        .ok()
                        .and_then(|i| labels.get(i))
                        .cloned()
                        .unwrap_or_default(),
                    _ => String::new(),
                })
                .label_style((FONT_FAMILY, 16))
                .draw()
                .map_err(|e| chart_error(path, &e))?;
        }

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(25)
                    .data(
                        (0u32..)
                            .zip(self.values.iter())
                            .map(|(i, v)| (i, *v)),
                    ),
            )
            .map_err(|e| chart_error(path, &e))?;

        root.present().map_err(|e| chart_error(path, &e))?;
        Ok(())
    }
}

fn chart_error(path: &Path, e: &impl std::fmt::Display) -> ExportError {
    ExportError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Register a font for chart text. Returns whether one is available.
///
/// Only the first call does any work.
fn ensure_font(configured: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            // Registered fonts must live for the rest of the process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                Ok(()) => {
                    tracing::debug!(font = %path.display(), "Registered chart font");
                    return true;
                }
                Err(_) => {
                    tracing::warn!(font = %path.display(), "Unusable font file");
                }
            }
        }

        tracing::warn!("No usable font found; charts will be drawn without text");
        false
    })
}

/// Render the three charts into `output.charts_dir`, returning their paths.
pub fn render_charts(
    kpis: &KpiReport,
    risk: &RiskSummary,
    output: &OutputConfig,
) -> Result<Vec<PathBuf>, ExportError> {
    ensure_dir(&output.charts_dir)?;
    let with_text = ensure_font(output.font_path.as_deref());
    let size = (output.chart_width, output.chart_height);

    let charts = [
        (CHART_RISK_LEVEL_FILE, BarChart::risk_levels(risk)),
        (CHART_PARETO_FILE, BarChart::failure_modes(kpis)),
        (CHART_TYPE_FILE, BarChart::product_types(kpis)),
    ];

    let mut written = Vec::with_capacity(charts.len());
    for (file, chart) in &charts {
        let path = output.charts_dir.join(file);
        chart.render(&path, size, with_text)?;
        tracing::info!(file = %path.display(), "Wrote chart");
        written.push(path);
    }
    Ok(written)
}
