//! CSV output format for dashboard reports
//!
//! Long format: one `section,key,metric,value` line per figure, so every
//! panel fits in a single sheet. Row-level bubble points are not exported.

use crate::aggregate::GroupAverage;
use crate::dashboard::{DashboardReport, RegressionOutcome};
use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

/// One exported figure
#[derive(Debug, Clone, PartialEq)]
pub struct CsvFigure {
    pub section: &'static str,
    pub key: String,
    pub metric: &'static str,
    pub value: String,
}

impl CsvFigure {
    fn new(section: &'static str, key: impl Into<String>, metric: &'static str, value: impl ToString) -> Self {
        Self {
            section,
            key: key.into(),
            metric,
            value: value.to_string(),
        }
    }
}

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    figures: Vec<CsvFigure>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a report into figures
    pub fn from_report(report: &DashboardReport) -> Self {
        let mut out = Self::new();
        let s = &report.summary;

        out.add(CsvFigure::new("summary", "", "rows", s.rows));
        out.add(CsvFigure::new("summary", "", "rejected", s.rejected));
        for (metric, value) in [
            ("mean_accuracy", s.mean_accuracy),
            ("mean_cost_cents", s.mean_cost_cents),
            ("mean_execution_time_seconds", s.mean_execution_time_seconds),
            ("mean_cpu_usage_percent", s.mean_cpu_usage_percent),
        ] {
            out.add(CsvFigure::new("summary", "", metric, opt(value)));
        }

        out.add_group("autonomy_success", "mean_success_rate", &report.autonomy_success);
        out.add_group("complexity_cpu", "mean_cpu_usage_percent", &report.complexity_cpu);

        for m in &report.top_models {
            out.add(CsvFigure::new("top_models", m.name.clone(), "mean_performance", m.mean_performance));
            out.add(CsvFigure::new("top_models", m.name.clone(), "mean_accuracy", m.mean_accuracy));
        }

        match &report.regression {
            RegressionOutcome::Fitted { model, .. } => {
                out.add(CsvFigure::new("regression", "intercept", "coefficient", model.intercept()));
                for (field, beta) in model.feature_coefficients() {
                    out.add(CsvFigure::new("regression", field.column(), "coefficient", beta));
                }
                out.add(CsvFigure::new("regression", "", "observations", model.observations()));
                out.add(CsvFigure::new("regression", "", "r_squared", opt(model.r_squared)));
            }
            RegressionOutcome::Failed { reason, .. } => {
                out.add(CsvFigure::new("regression", "", "error", reason));
            }
        }

        for b in &report.accuracy_boxplots {
            for (metric, value) in [
                ("whisker_min", b.whisker_min),
                ("q1", b.q1),
                ("median", b.median),
                ("q3", b.q3),
                ("whisker_max", b.whisker_max),
            ] {
                out.add(CsvFigure::new("accuracy_boxplot", b.label.clone(), metric, value));
            }
            out.add(CsvFigure::new("accuracy_boxplot", b.label.clone(), "outliers", b.outliers.len()));
        }

        out
    }

    pub fn add(&mut self, figure: CsvFigure) {
        self.figures.push(figure);
    }

    fn add_group(&mut self, section: &'static str, metric: &'static str, group: &GroupAverage) {
        for (label, value) in group.iter() {
            self.add(CsvFigure::new(section, label, metric, value));
        }
    }

    pub fn figures(&self) -> &[CsvFigure] {
        &self.figures
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(["section", "key", "metric", "value"])?;
        for f in &self.figures {
            writer.write_record([f.section, f.key.as_str(), f.metric, f.value.as_str()])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
        String::from_utf8(bytes).context("CSV output is not UTF-8")
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
