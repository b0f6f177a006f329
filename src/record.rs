//! Typed observation rows and the normalizer that builds them
//!
//! External records arrive as `field name -> raw string` maps (one per CSV line).
//! Numeric fields are coerced with [`to_num`]; a record missing any required
//! numeric field is rejected, while categorical fields and the performance
//! index are optional.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One untyped external record, keyed by column name
pub type RawRecord = HashMap<String, String>;

/// Numeric columns consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    TaskComplexity,
    AutonomyLevel,
    SuccessRate,
    AccuracyScore,
    ExecutionTimeSeconds,
    CpuUsagePercent,
    CostPerTaskCents,
    PerformanceIndex,
}

impl NumericField {
    /// Fields a record must carry to be accepted
    pub const REQUIRED: [NumericField; 7] = [
        NumericField::TaskComplexity,
        NumericField::AutonomyLevel,
        NumericField::SuccessRate,
        NumericField::AccuracyScore,
        NumericField::ExecutionTimeSeconds,
        NumericField::CpuUsagePercent,
        NumericField::CostPerTaskCents,
    ];

    /// Column name in the source dataset
    pub fn column(self) -> &'static str {
        match self {
            NumericField::TaskComplexity => "task_complexity",
            NumericField::AutonomyLevel => "autonomy_level",
            NumericField::SuccessRate => "success_rate",
            NumericField::AccuracyScore => "accuracy_score",
            NumericField::ExecutionTimeSeconds => "execution_time_seconds",
            NumericField::CpuUsagePercent => "cpu_usage_percent",
            NumericField::CostPerTaskCents => "cost_per_task_cents",
            NumericField::PerformanceIndex => "performance_index",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Categorical columns consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    ModelArchitecture,
    TaskCategory,
    DeploymentEnvironment,
}

impl CategoryField {
    /// Column name in the source dataset
    pub fn column(self) -> &'static str {
        match self {
            CategoryField::ModelArchitecture => "model_architecture",
            CategoryField::TaskCategory => "task_category",
            CategoryField::DeploymentEnvironment => "deployment_environment",
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One validated observation
///
/// Required numeric fields are plain `f64`; everything that may legitimately
/// be missing is an `Option`. Rows are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub model_architecture: Option<String>,
    pub deployment_environment: Option<String>,
    pub task_category: Option<String>,

    pub task_complexity: f64,
    pub autonomy_level: f64,
    pub success_rate: f64,
    pub accuracy_score: f64,

    pub execution_time_seconds: f64,
    pub cpu_usage_percent: f64,
    pub cost_per_task_cents: f64,

    pub performance_index: Option<f64>,
}

impl Row {
    /// Read a numeric field; only the performance index can be absent
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::TaskComplexity => Some(self.task_complexity),
            NumericField::AutonomyLevel => Some(self.autonomy_level),
            NumericField::SuccessRate => Some(self.success_rate),
            NumericField::AccuracyScore => Some(self.accuracy_score),
            NumericField::ExecutionTimeSeconds => Some(self.execution_time_seconds),
            NumericField::CpuUsagePercent => Some(self.cpu_usage_percent),
            NumericField::CostPerTaskCents => Some(self.cost_per_task_cents),
            NumericField::PerformanceIndex => self.performance_index,
        }
    }

    /// Read a categorical field (`None` when missing or empty)
    pub fn category(&self, field: CategoryField) -> Option<&str> {
        match field {
            CategoryField::ModelArchitecture => self.model_architecture.as_deref(),
            CategoryField::TaskCategory => self.task_category.as_deref(),
            CategoryField::DeploymentEnvironment => self.deployment_environment.as_deref(),
        }
    }
}

/// Result of normalizing a batch of external records
#[derive(Debug, Clone, Default)]
pub struct NormalizedDataset {
    /// Accepted rows, in input order
    pub rows: Vec<Row>,
    /// Number of records dropped for missing required fields
    pub rejected: usize,
}

/// Coerce a raw value to a finite number
///
/// Empty, unparseable, NaN and infinite inputs all count as absent.
pub fn to_num(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn text(record: &RawRecord, field: CategoryField) -> Option<String> {
    record
        .get(field.column())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number(record: &RawRecord, field: NumericField) -> Option<f64> {
    record.get(field.column()).and_then(|raw| to_num(raw))
}

/// Normalize one external record, or `None` if a required field is absent
pub fn normalize_record(record: &RawRecord) -> Option<Row> {
    Some(Row {
        model_architecture: text(record, CategoryField::ModelArchitecture),
        deployment_environment: text(record, CategoryField::DeploymentEnvironment),
        task_category: text(record, CategoryField::TaskCategory),

        task_complexity: number(record, NumericField::TaskComplexity)?,
        autonomy_level: number(record, NumericField::AutonomyLevel)?,
        success_rate: number(record, NumericField::SuccessRate)?,
        accuracy_score: number(record, NumericField::AccuracyScore)?,

        execution_time_seconds: number(record, NumericField::ExecutionTimeSeconds)?,
        cpu_usage_percent: number(record, NumericField::CpuUsagePercent)?,
        cost_per_task_cents: number(record, NumericField::CostPerTaskCents)?,

        performance_index: number(record, NumericField::PerformanceIndex),
    })
}

/// Normalize a batch, keeping input order and counting rejections
pub fn normalize_records<'a, I>(records: I) -> NormalizedDataset
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut dataset = NormalizedDataset::default();
    for record in records {
        match normalize_record(record) {
            Some(row) => dataset.rows.push(row),
            None => dataset.rejected += 1,
        }
    }

    tracing::debug!(
        accepted = dataset.rows.len(),
        rejected = dataset.rejected,
        "normalized records"
    );

    dataset
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Baseline valid row for struct-update syntax in other modules' tests
    pub(crate) fn sample_row() -> Row {
        Row {
            model_architecture: Some("GPT-4o".to_string()),
            deployment_environment: Some("Cloud".to_string()),
            task_category: Some("Research".to_string()),
            task_complexity: 5.0,
            autonomy_level: 5.0,
            success_rate: 0.8,
            accuracy_score: 0.9,
            execution_time_seconds: 10.0,
            cpu_usage_percent: 40.0,
            cost_per_task_cents: 0.03,
            performance_index: Some(0.75),
        }
    }

    fn complete() -> RawRecord {
        record(&[
            ("model_architecture", "GPT-4o"),
            ("deployment_environment", "Cloud"),
            ("task_category", "Research"),
            ("task_complexity", "7"),
            ("autonomy_level", "5"),
            ("success_rate", "0.82"),
            ("accuracy_score", "0.91"),
            ("execution_time_seconds", "12.5"),
            ("cpu_usage_percent", "44.1"),
            ("cost_per_task_cents", "0.031"),
            ("performance_index", "0.77"),
        ])
    }

    #[test]
    fn test_to_num_parses_finite_values() {
        assert_eq!(to_num("3"), Some(3.0));
        assert_eq!(to_num(" 0.25 "), Some(0.25));
        assert_eq!(to_num("-1e3"), Some(-1000.0));
    }

    #[test]
    fn test_to_num_rejects_non_finite_and_garbage() {
        assert_eq!(to_num(""), None);
        assert_eq!(to_num("   "), None);
        assert_eq!(to_num("abc"), None);
        assert_eq!(to_num("NaN"), None);
        assert_eq!(to_num("inf"), None);
        assert_eq!(to_num("-infinity"), None);
    }

    #[test]
    fn test_normalize_complete_record() {
        let row = normalize_record(&complete()).unwrap();
        assert_eq!(row.model_architecture.as_deref(), Some("GPT-4o"));
        assert_eq!(row.task_complexity, 7.0);
        assert_eq!(row.accuracy_score, 0.91);
        assert_eq!(row.performance_index, Some(0.77));
    }

    #[test]
    fn test_missing_required_field_rejects_record() {
        for field in NumericField::REQUIRED {
            let mut raw = complete();
            raw.insert(field.column().to_string(), "n/a".to_string());
            assert!(
                normalize_record(&raw).is_none(),
                "record without {} should be rejected",
                field
            );
        }
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let mut raw = complete();
        raw.remove("performance_index");
        raw.insert("model_architecture".to_string(), "".to_string());
        raw.remove("task_category");

        let row = normalize_record(&raw).unwrap();
        assert_eq!(row.performance_index, None);
        assert_eq!(row.category(CategoryField::ModelArchitecture), None);
        assert_eq!(row.category(CategoryField::TaskCategory), None);
        assert_eq!(row.category(CategoryField::DeploymentEnvironment), Some("Cloud"));
    }

    #[test]
    fn test_normalize_records_counts_rejections() {
        let mut broken = complete();
        broken.remove("cpu_usage_percent");
        let records = vec![complete(), broken, complete()];

        let dataset = normalize_records(&records);
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rejected, 1);
    }

    #[test]
    fn test_numeric_selector_matches_fields() {
        let row = normalize_record(&complete()).unwrap();
        assert_eq!(row.numeric(NumericField::AutonomyLevel), Some(5.0));
        assert_eq!(row.numeric(NumericField::CostPerTaskCents), Some(0.031));
        assert_eq!(row.numeric(NumericField::PerformanceIndex), Some(0.77));
    }

    #[test]
    fn test_field_display_uses_column_name() {
        assert_eq!(NumericField::CpuUsagePercent.to_string(), "cpu_usage_percent");
        assert_eq!(CategoryField::TaskCategory.to_string(), "task_category");
    }
}
