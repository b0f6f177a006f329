//! Integration tests for the agentlens binary
//!
//! Runs the CLI against tests/fixtures/agents_sample.csv: 12 valid rows plus
//! one row missing accuracy_score.

use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/agents_sample.csv");

fn agentlens() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("agentlens")
}

#[test]
fn test_text_report_sections() {
    agentlens()
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Dataset ==="))
        .stdout(predicate::str::contains("Rows:            12"))
        .stdout(predicate::str::contains("Rejected rows:   1"))
        .stdout(predicate::str::contains("Mean accuracy:   0.650"))
        .stdout(predicate::str::contains("=== Top Models ==="))
        .stdout(predicate::str::contains(" 1. model-2"))
        .stdout(predicate::str::contains("=== Success Rate by Autonomy Level ==="))
        .stdout(predicate::str::contains("R²:"))
        .stdout(predicate::str::contains("=== Accuracy by Task Complexity ==="));
}

#[test]
fn test_json_output_parses() {
    let output = agentlens()
        .arg("--format")
        .arg("json")
        .arg(FIXTURE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["report"]["summary"]["rows"], 12);
    assert_eq!(parsed["report"]["summary"]["rejected"], 1);
    assert_eq!(parsed["report"]["regression"]["status"], "fitted");
    assert_eq!(
        parsed["report"]["regression"]["model"]["coefficients"]
            .as_array()
            .unwrap()
            .len(),
        4
    );
    assert_eq!(
        parsed["report"]["autonomy_success"]["labels"],
        serde_json::json!(["1", "2", "3", "4"])
    );
    assert!(parsed["selection"].as_object().unwrap().is_empty());
}

#[test]
fn test_json_output_records_selection() {
    let output = agentlens()
        .args(["--format", "json", "--task", "Research"])
        .arg(FIXTURE)
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["selection"]["task_category"], "Research");
    assert_eq!(parsed["report"]["summary"]["rows"], 6);
}

#[test]
fn test_csv_output() {
    agentlens()
        .args(["--format", "csv"])
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("section,key,metric,value\n"))
        .stdout(predicate::str::contains("summary,,rows,12"))
        .stdout(predicate::str::contains("regression,intercept,coefficient,"))
        .stdout(predicate::str::contains("accuracy_boxplot,1,median,"));
}

#[test]
fn test_filter_with_too_few_rows_reports_fit_failure() {
    agentlens()
        .args(["--task", "Research", "--env", "Edge"])
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:            2"))
        .stdout(predicate::str::contains("Fit failed: Insufficient data"));
}

#[test]
fn test_filter_without_matches_renders_empty_panels() {
    agentlens()
        .args(["--env", "Mainframe"])
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:            0"))
        .stdout(predicate::str::contains("No data."));
}

#[test]
fn test_top_limits_ranking() {
    agentlens()
        .args(["--top", "1"])
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. model-2"))
        .stdout(predicate::str::contains(" 2. ").not());
}

#[test]
fn test_list_filters() {
    agentlens()
        .arg("--list-filters")
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Task categories:\n  Coding\n  Research\n  Translation\n",
        ))
        .stdout(predicate::str::contains(
            "Deployment environments:\n  Cloud\n  Edge\n",
        ));
}

#[test]
fn test_config_file_is_applied() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "top_n = 2").unwrap();

    agentlens()
        .arg("--config")
        .arg(config.path())
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains(" 2. "))
        .stdout(predicate::str::contains(" 3. ").not());
}

#[test]
fn test_invalid_config_fails() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "whisker_multiplier = -1.0").unwrap();

    agentlens()
        .arg("--config")
        .arg(config.path())
        .arg(FIXTURE)
        .assert()
        .failure();
}

#[test]
fn test_missing_dataset_fails() {
    agentlens()
        .arg("/nonexistent/agents.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open dataset"));
}

#[test]
fn test_dataset_without_valid_rows() {
    let mut csv = NamedTempFile::new().unwrap();
    writeln!(csv, "model_architecture,accuracy_score").unwrap();
    writeln!(csv, "GPT-4o,0.9").unwrap();

    agentlens()
        .arg(csv.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows:            0"))
        .stdout(predicate::str::contains("Rejected rows:   1"));
}
