//! Row selection by task category and deployment environment
//!
//! Mirrors the dashboard's two dropdowns: each is either a concrete value or
//! the `__all__` wildcard. Also builds the sorted option lists that populate
//! those dropdowns.

use crate::record::{CategoryField, Row};
use std::collections::BTreeSet;

/// Dropdown value meaning "no restriction"
pub const ALL: &str = "__all__";

/// Predicate over rows (None = accept any value)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    task_category: Option<String>,
    deployment_environment: Option<String>,
}

impl RowFilter {
    /// Create a filter that includes every row
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from dropdown selections; `__all__` or an empty string disables a criterion
    pub fn from_selection(task: &str, environment: &str) -> Self {
        Self {
            task_category: selection(task),
            deployment_environment: selection(environment),
        }
    }

    /// Check if a row passes both criteria
    pub fn should_include(&self, row: &Row) -> bool {
        matches(&self.task_category, row.category(CategoryField::TaskCategory))
            && matches(
                &self.deployment_environment,
                row.category(CategoryField::DeploymentEnvironment),
            )
    }

    /// Copy out the rows that pass, keeping input order
    pub fn apply(&self, rows: &[Row]) -> Vec<Row> {
        if self.is_all() {
            return rows.to_vec();
        }
        rows.iter()
            .filter(|r| self.should_include(r))
            .cloned()
            .collect()
    }

    pub fn is_all(&self) -> bool {
        self.task_category.is_none() && self.deployment_environment.is_none()
    }

    pub fn task_category(&self) -> Option<&str> {
        self.task_category.as_deref()
    }

    pub fn deployment_environment(&self) -> Option<&str> {
        self.deployment_environment.as_deref()
    }
}

fn selection(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}

fn matches(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual == Some(w.as_str()),
    }
}

/// Distinct non-empty values of a categorical field, sorted
pub fn distinct_values(rows: &[Row], field: CategoryField) -> Vec<String> {
    rows.iter()
        .filter_map(|r| r.category(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Options for both dropdowns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub task_categories: Vec<String>,
    pub deployment_environments: Vec<String>,
}

impl FilterOptions {
    pub fn from_rows(rows: &[Row]) -> Self {
        Self {
            task_categories: distinct_values(rows, CategoryField::TaskCategory),
            deployment_environments: distinct_values(rows, CategoryField::DeploymentEnvironment),
        }
    }
}
