//! Boxplot statistics with Tukey fences
//!
//! For each group: quartiles by linear interpolation, whiskers at the most
//! extreme inliers, and every value outside the fences reported as an outlier.

use crate::aggregate::{grouped_values, GroupBy};
use crate::record::{NumericField, Row};
use crate::stats::quantile;
use serde::{Deserialize, Serialize};

/// Default Tukey multiplier applied to the IQR
pub const DEFAULT_WHISKER_MULTIPLIER: f64 = 1.5;

/// Order statistics for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotStat {
    pub label: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_min: f64,
    pub whisker_max: f64,
    pub low_fence: f64,
    pub high_fence: f64,
    pub outliers: Vec<f64>,
}

impl BoxplotStat {
    /// Summarize one group of values; `None` for an empty group
    ///
    /// `values` need not be sorted.
    pub fn from_values(label: impl Into<String>, values: &[f64], multiplier: f64) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        let low_fence = q1 - multiplier * iqr;
        let high_fence = q3 + multiplier * iqr;

        let (inliers, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|&&v| v >= low_fence && v <= high_fence);

        // No inliers left: fall back to the raw extremes
        let (whisker_min, whisker_max) = match (inliers.first(), inliers.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (sorted[0], sorted[sorted.len() - 1]),
        };

        Some(Self {
            label: label.into(),
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_min,
            whisker_max,
            low_fence,
            high_fence,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Boxplot statistics per distinct `group_by` key, ascending
pub fn boxplot_stats(rows: &[Row], group_by: impl Into<GroupBy>, value: NumericField) -> Vec<BoxplotStat> {
    boxplot_stats_with(rows, group_by, value, DEFAULT_WHISKER_MULTIPLIER)
}

/// Same as [`boxplot_stats`] with an explicit fence multiplier
pub fn boxplot_stats_with(
    rows: &[Row],
    group_by: impl Into<GroupBy>,
    value: NumericField,
    multiplier: f64,
) -> Vec<BoxplotStat> {
    grouped_values(rows, group_by.into(), value)
        .into_iter()
        .filter_map(|(key, values)| BoxplotStat::from_values(key.label(), &values, multiplier))
        .collect()
}
