//! Shared numeric helpers and dataset-level KPIs
//!
//! `quantile` is the linear-interpolation estimator used by the boxplot
//! summarizer; `DatasetSummary` holds the headline figures shown above the
//! charts.

use crate::record::{NumericField, Row};
use serde::{Deserialize, Serialize};

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile of an ascending-sorted slice using linear interpolation
///
/// `pos = (len - 1) * q`; the result interpolates between the order
/// statistics at `floor(pos)` and the next index, or returns the last one
/// when there is no next index.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let frac = pos - base as f64;

    match sorted.get(base + 1) {
        Some(next) => Some(sorted[base] + frac * (next - sorted[base])),
        None => Some(sorted[base]),
    }
}

/// Round to a fixed number of decimal digits
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Headline figures for the current working set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Rows in the working set
    pub rows: usize,
    /// Records dropped at ingestion
    pub rejected: usize,
    pub mean_accuracy: Option<f64>,
    pub mean_cost_cents: Option<f64>,
    pub mean_execution_time_seconds: Option<f64>,
    pub mean_cpu_usage_percent: Option<f64>,
}

impl DatasetSummary {
    /// Compute KPIs over `rows`; `rejected` is carried through from ingestion
    pub fn from_rows(rows: &[Row], rejected: usize) -> Self {
        Self {
            rows: rows.len(),
            rejected,
            mean_accuracy: field_mean(rows, NumericField::AccuracyScore),
            mean_cost_cents: field_mean(rows, NumericField::CostPerTaskCents),
            mean_execution_time_seconds: field_mean(rows, NumericField::ExecutionTimeSeconds),
            mean_cpu_usage_percent: field_mean(rows, NumericField::CpuUsagePercent),
        }
    }
}

/// Mean of a numeric field over the rows that carry it
fn field_mean(rows: &[Row], field: NumericField) -> Option<f64> {
    let values: Vec<f64> = rows.iter().filter_map(|r| r.numeric(field)).collect();
    mean(&values)
}
