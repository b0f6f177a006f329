//! CLI argument parsing for agentlens

use crate::filter::ALL;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for dashboard reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "agentlens")]
#[command(version)]
#[command(about = "Summary statistics and regression for agentic AI task-performance datasets", long_about = None)]
pub struct Cli {
    /// CSV dataset to analyze
    #[arg(value_name = "CSV")]
    pub dataset: PathBuf,

    /// Only include rows with this task category
    #[arg(long = "task", value_name = "CATEGORY", default_value = ALL)]
    pub task: String,

    /// Only include rows with this deployment environment
    #[arg(long = "env", value_name = "ENVIRONMENT", default_value = ALL)]
    pub env: String,

    /// Number of models in the top performers table (overrides config)
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print the available task categories and environments, then exit
    #[arg(long = "list-filters")]
    pub list_filters: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_dataset() {
        let cli = Cli::parse_from(["agentlens", "data.csv"]);
        assert_eq!(cli.dataset, PathBuf::from("data.csv"));
        assert_eq!(cli.task, ALL);
        assert_eq!(cli.env, ALL);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.top.is_none());
        assert!(!cli.list_filters);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_requires_dataset() {
        assert!(Cli::try_parse_from(["agentlens"]).is_err());
    }

    #[test]
    fn test_cli_filters() {
        let cli = Cli::parse_from(["agentlens", "--task", "Research", "--env", "Edge", "d.csv"]);
        assert_eq!(cli.task, "Research");
        assert_eq!(cli.env, "Edge");
    }

    #[test]
    fn test_cli_format_and_top() {
        let cli = Cli::parse_from(["agentlens", "--format", "json", "--top", "3", "d.csv"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.top, Some(3));
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["agentlens", "--format", "xml", "d.csv"]).is_err());
    }

    #[test]
    fn test_cli_config_short_flag() {
        let cli = Cli::parse_from(["agentlens", "-c", "dash.toml", "d.csv"]);
        assert_eq!(cli.config, Some(PathBuf::from("dash.toml")));
    }
}
