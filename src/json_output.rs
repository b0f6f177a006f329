//! JSON output format for dashboard reports
//!
//! The document wraps a [`DashboardReport`] with the filter selection that
//! produced it so a consumer can tell which slice of the data it describes.

use crate::dashboard::DashboardReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Active filter values (`None` = all)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_environment: Option<String>,
}

/// Top-level JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub version: String,
    pub selection: JsonSelection,
    pub report: DashboardReport,
}

impl JsonOutput {
    pub fn new(selection: JsonSelection, report: DashboardReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            selection,
            report,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize dashboard report")
    }
}
