//! Dashboard configuration
//!
//! Loaded from TOML; every key is optional and falls back to the defaults the
//! dashboard ships with.

use crate::boxplot::DEFAULT_WHISKER_MULTIPLIER;
use crate::ranking::DEFAULT_TOP_N;
use crate::regression::{DEFAULT_MAX_POINTS, DEFAULT_PIVOT_TOLERANCE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for one dashboard render
///
/// # Example
/// ```
/// use agentlens::config::DashboardConfig;
///
/// let config = DashboardConfig::default();
/// assert_eq!(config.top_n, 6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Entries in the top-performers table
    pub top_n: usize,

    /// Tukey fence multiplier applied to the IQR
    ///
    /// 1.5 is the conventional boxplot whisker; 3.0 marks only "far out" values.
    pub whisker_multiplier: f64,

    /// Pivot magnitude below which Gauss-Jordan looks for a row swap
    pub pivot_tolerance: f64,

    /// Point budget for the predicted-vs-actual scatter
    pub max_scatter_points: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            whisker_multiplier: DEFAULT_WHISKER_MULTIPLIER,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            max_scatter_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl DashboardConfig {
    /// Load and validate a TOML configuration file
    ///
    /// # Example TOML
    /// ```toml
    /// top_n = 10
    /// whisker_multiplier = 3.0
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).with_context(|| "Failed to parse dashboard config")?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("top_n must be >= 1".to_string());
        }

        if !self.whisker_multiplier.is_finite() || self.whisker_multiplier <= 0.0 {
            return Err(format!(
                "whisker_multiplier must be a positive number, got {}",
                self.whisker_multiplier
            ));
        }

        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance <= 0.0 {
            return Err(format!(
                "pivot_tolerance must be a positive number, got {}",
                self.pivot_tolerance
            ));
        }

        if self.max_scatter_points == 0 {
            return Err("max_scatter_points must be >= 1".to_string());
        }

        Ok(())
    }
}
