//! Grouped averages for the exploration charts
//!
//! Rows are bucketed by a [`GroupBy`] selector and the mean of a numeric value
//! field is reported per bucket, keys ascending.

use crate::record::{CategoryField, NumericField, Row};
use crate::stats::{mean, round_to};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Field used to bucket rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "field")]
pub enum GroupBy {
    Numeric(NumericField),
    Category(CategoryField),
}

impl GroupBy {
    /// Extract the grouping key for a row, `None` if the field is absent
    pub fn key(&self, row: &Row) -> Option<GroupKey> {
        match self {
            GroupBy::Numeric(field) => row.numeric(*field).map(GroupKey::Number),
            GroupBy::Category(field) => row
                .category(*field)
                .map(|s| GroupKey::Label(s.to_string())),
        }
    }
}

impl From<NumericField> for GroupBy {
    fn from(field: NumericField) -> Self {
        GroupBy::Numeric(field)
    }
}

impl From<CategoryField> for GroupBy {
    fn from(field: CategoryField) -> Self {
        GroupBy::Category(field)
    }
}

/// Value of a grouping field
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKey {
    Number(f64),
    Label(String),
}

impl GroupKey {
    /// Display label (`1`, `2.5`, `Cloud`)
    pub fn label(&self) -> String {
        match self {
            GroupKey::Number(n) => n.to_string(),
            GroupKey::Label(s) => s.clone(),
        }
    }

    fn identity(&self) -> KeyIdentity {
        match self {
            // -0.0 and 0.0 are the same group
            GroupKey::Number(n) => KeyIdentity::Number((n + 0.0).to_bits()),
            GroupKey::Label(s) => KeyIdentity::Label(s.clone()),
        }
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupKey::Number(a), GroupKey::Number(b)) => a.total_cmp(b),
            (GroupKey::Label(a), GroupKey::Label(b)) => a.cmp(b),
            (GroupKey::Number(_), GroupKey::Label(_)) => Ordering::Less,
            (GroupKey::Label(_), GroupKey::Number(_)) => Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyIdentity {
    Number(u64),
    Label(String),
}

/// Collect the values of `value` per group, keys ascending
///
/// Rows missing either the group key or the value are skipped. Values keep
/// their input order within each group.
pub fn grouped_values(rows: &[Row], group_by: GroupBy, value: NumericField) -> Vec<(GroupKey, Vec<f64>)> {
    let mut index: HashMap<KeyIdentity, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<f64>)> = Vec::new();

    for row in rows {
        let (Some(key), Some(v)) = (group_by.key(row), row.numeric(value)) else {
            continue;
        };
        let slot = *index.entry(key.identity()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(v);
    }

    groups.sort_by(|a, b| a.0.cmp(&b.0));
    groups
}

/// Per-group means, keys ascending, values rounded to 3 decimals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupAverage {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl GroupAverage {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, mean)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Mean of `value` for each distinct `group_by` key
pub fn group_average(rows: &[Row], group_by: impl Into<GroupBy>, value: NumericField) -> GroupAverage {
    let mut result = GroupAverage::default();

    for (key, values) in grouped_values(rows, group_by.into(), value) {
        // Groups are never empty
        if let Some(m) = mean(&values) {
            result.labels.push(key.label());
            result.values.push(round_to(m, 3));
        }
    }

    result
}
