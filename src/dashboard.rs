//! One full dashboard render
//!
//! Every panel is computed independently from the same filtered rows. A
//! failed regression does not abort the render: it is carried as
//! [`RegressionOutcome::Failed`] so the remaining panels still show.

use crate::aggregate::{group_average, GroupAverage};
use crate::boxplot::{boxplot_stats_with, BoxplotStat};
use crate::bubble::{bubble_points, BubblePoint};
use crate::config::DashboardConfig;
use crate::ranking::{top_models, RankedEntity};
use crate::record::{NumericField, Row};
use crate::regression::{
    fit_with_tolerance, sample_predictions, FitError, PredictionSample, RegressionResult,
    DEFAULT_FEATURES, DEFAULT_TARGET,
};
use crate::stats::DatasetSummary;
use serde::{Deserialize, Serialize};

/// Result of the accuracy model for this render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegressionOutcome {
    Fitted {
        model: RegressionResult,
        #[serde(skip_serializing_if = "Option::is_none")]
        predictions: Option<PredictionSample>,
    },
    Failed {
        reason: String,
        #[serde(skip)]
        error: Option<FitError>,
    },
}

impl RegressionOutcome {
    fn from_fit(fit: Result<RegressionResult, FitError>, max_points: usize) -> Self {
        match fit {
            Ok(model) => {
                let predictions = sample_predictions(&model, max_points);
                RegressionOutcome::Fitted { model, predictions }
            }
            Err(e) => {
                tracing::warn!("Regression fit failed: {}", e);
                RegressionOutcome::Failed {
                    reason: e.to_string(),
                    error: Some(e),
                }
            }
        }
    }

    pub fn model(&self) -> Option<&RegressionResult> {
        match self {
            RegressionOutcome::Fitted { model, .. } => Some(model),
            RegressionOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&FitError> {
        match self {
            RegressionOutcome::Fitted { .. } => None,
            RegressionOutcome::Failed { error, .. } => error.as_ref(),
        }
    }
}

/// Everything the rendering layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub summary: DatasetSummary,
    /// Mean success rate per autonomy level
    pub autonomy_success: GroupAverage,
    /// Mean CPU usage per task complexity
    pub complexity_cpu: GroupAverage,
    pub bubbles: Vec<BubblePoint>,
    pub regression: RegressionOutcome,
    /// Accuracy distribution per task complexity
    pub accuracy_boxplots: Vec<BoxplotStat>,
    pub top_models: Vec<RankedEntity>,
}

impl DashboardReport {
    /// Compute every panel over `rows`
    ///
    /// `rejected` is the ingestion rejection count, reported in the summary.
    pub fn compute(rows: &[Row], rejected: usize, config: &DashboardConfig) -> Self {
        let fit = fit_with_tolerance(rows, &DEFAULT_FEATURES, DEFAULT_TARGET, config.pivot_tolerance);

        Self {
            summary: DatasetSummary::from_rows(rows, rejected),
            autonomy_success: group_average(rows, NumericField::AutonomyLevel, NumericField::SuccessRate),
            complexity_cpu: group_average(rows, NumericField::TaskComplexity, NumericField::CpuUsagePercent),
            bubbles: bubble_points(rows),
            regression: RegressionOutcome::from_fit(fit, config.max_scatter_points),
            accuracy_boxplots: boxplot_stats_with(
                rows,
                NumericField::TaskComplexity,
                NumericField::AccuracyScore,
                config.whisker_multiplier,
            ),
            top_models: top_models(rows, config.top_n),
        }
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let s = &self.summary;

        report.push_str("=== Dataset ===\n");
        report.push_str(&format!("Rows:            {}\n", s.rows));
        report.push_str(&format!("Rejected rows:   {}\n", s.rejected));
        report.push_str(&format!("Mean accuracy:   {}\n", fmt_opt(s.mean_accuracy, 3, "")));
        report.push_str(&format!("Mean cost:       {}\n", fmt_opt(s.mean_cost_cents, 3, "¢")));
        report.push_str(&format!(
            "Mean time:       {}\n",
            fmt_opt(s.mean_execution_time_seconds, 2, " s")
        ));
        report.push_str(&format!(
            "Mean CPU:        {}\n",
            fmt_opt(s.mean_cpu_usage_percent, 1, "%")
        ));

        report.push_str("\n=== Top Models ===\n");
        if self.top_models.is_empty() {
            report.push_str("No data.\n");
        }
        for (rank, m) in self.top_models.iter().enumerate() {
            report.push_str(&format!(
                "{:>2}. {:<24} perf={:.4} acc={:.4}\n",
                rank + 1,
                m.name,
                m.mean_performance,
                m.mean_accuracy
            ));
        }

        push_group(&mut report, "Success Rate by Autonomy Level", &self.autonomy_success);
        push_group(&mut report, "CPU Usage by Task Complexity", &self.complexity_cpu);

        report.push_str("\n=== Regression: accuracy_score ~ complexity + cost + time ===\n");
        match &self.regression {
            RegressionOutcome::Fitted { model, .. } => {
                report.push_str(&format!("Observations:    {}\n", model.observations()));
                report.push_str(&format!("Intercept:       {:.6}\n", model.intercept()));
                for (field, beta) in model.feature_coefficients() {
                    report.push_str(&format!("{:<24} {:.6}\n", field.column(), beta));
                }
                match model.r_squared {
                    Some(r2) => report.push_str(&format!("R²:              {:.3}\n", r2)),
                    None => report.push_str("R²:              undefined (constant target)\n"),
                }
            }
            RegressionOutcome::Failed { reason, .. } => {
                report.push_str(&format!("⚠️  Fit failed: {}\n", reason));
            }
        }

        report.push_str("\n=== Accuracy by Task Complexity ===\n");
        if self.accuracy_boxplots.is_empty() {
            report.push_str("No data.\n");
        }
        for b in &self.accuracy_boxplots {
            report.push_str(&format!(
                "{:>4}: n={:<6} min={:.3} q1={:.3} median={:.3} q3={:.3} max={:.3} outliers={}\n",
                b.label,
                b.count,
                b.whisker_min,
                b.q1,
                b.median,
                b.q3,
                b.whisker_max,
                b.outliers.len()
            ));
        }

        report
    }
}

fn push_group(report: &mut String, title: &str, group: &GroupAverage) {
    report.push_str(&format!("\n=== {} ===\n", title));
    if group.is_empty() {
        report.push_str("No data.\n");
    }
    for (label, value) in group.iter() {
        report.push_str(&format!("{:>4}: {:.3}\n", label, value));
    }
}

fn fmt_opt(value: Option<f64>, digits: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", digits, v, unit),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::sample_row;

    fn rows() -> Vec<Row> {
        (0..12)
            .map(|i| {
                let x = i as f64;
                Row {
                    model_architecture: Some(format!("model-{}", i % 3)),
                    task_complexity: (i % 5 + 1) as f64,
                    autonomy_level: (i % 4 + 1) as f64,
                    cost_per_task_cents: 0.01 * ((i * 7) % 11) as f64,
                    execution_time_seconds: 2.0 + ((i * 5) % 9) as f64,
                    accuracy_score: 0.5 + 0.03 * x - 0.01 * ((i * 3) % 4) as f64,
                    performance_index: Some(0.1 * (i % 3) as f64),
                    ..sample_row()
                }
            })
            .collect()
    }

    #[test]
    fn test_compute_fills_every_panel() {
        let report = DashboardReport::compute(&rows(), 2, &DashboardConfig::default());

        assert_eq!(report.summary.rows, 12);
        assert_eq!(report.summary.rejected, 2);
        assert_eq!(report.autonomy_success.labels, vec!["1", "2", "3", "4"]);
        assert_eq!(report.complexity_cpu.labels, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(report.bubbles.len(), 12);
        assert_eq!(report.accuracy_boxplots.len(), 5);
        assert_eq!(report.top_models.len(), 3);
        assert_eq!(report.top_models[0].name, "model-2");

        let model = report.regression.model().expect("fit should succeed");
        assert_eq!(model.coefficients.len(), 4);
        assert!(report.regression.error().is_none());
    }

    #[test]
    fn test_empty_rows_render_without_panicking() {
        let report = DashboardReport::compute(&[], 0, &DashboardConfig::default());

        assert!(report.autonomy_success.is_empty());
        assert!(report.accuracy_boxplots.is_empty());
        assert!(report.top_models.is_empty());
        assert_eq!(
            report.regression.error(),
            Some(&FitError::InsufficientData {
                required: 4,
                actual: 0
            })
        );

        let text = report.to_report_string();
        assert!(text.contains("Fit failed"));
        assert!(text.contains("No data."));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_config_controls_top_n() {
        let mut config = DashboardConfig::default();
        config.top_n = 1;
        let report = DashboardReport::compute(&rows(), 0, &config);
        assert_eq!(report.top_models.len(), 1);
    }

    #[test]
    fn test_report_string_sections() {
        let report = DashboardReport::compute(&rows(), 0, &DashboardConfig::default());
        let text = report.to_report_string();
        assert!(text.contains("=== Dataset ==="));
        assert!(text.contains("=== Top Models ==="));
        assert!(text.contains("task_complexity"));
        assert!(text.contains("R²:"));
        assert!(text.contains("median="));
    }

    #[test]
    fn test_report_string_lines() {
        let constant: Vec<Row> = rows()
            .into_iter()
            .map(|r| Row {
                accuracy_score: 0.5,
                ..r
            })
            .collect();
        let text = DashboardReport::compute(&constant, 1, &DashboardConfig::default()).to_report_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=== Dataset ===");
        assert_eq!(lines[1], "Rows:            12");
        assert_eq!(lines[2], "Rejected rows:   1");
        assert_eq!(lines[3], "Mean accuracy:   0.500");
        assert!(lines.contains(&"R²:              undefined (constant target)"));
        assert!(lines.contains(&"Observations:    12"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_singular_fit_is_reported_not_raised() {
        let flat: Vec<Row> = rows()
            .into_iter()
            .map(|r| Row {
                execution_time_seconds: 0.0,
                ..r
            })
            .collect();
        let report = DashboardReport::compute(&flat, 0, &DashboardConfig::default());
        assert!(matches!(
            report.regression.error(),
            Some(FitError::Singular { .. })
        ));
        assert_eq!(report.complexity_cpu.len(), 5);
    }
}
