//! Runs the `citybreak` binary end to end.

use std::io::Write;
use std::process::{Command, Output};

fn citybreak(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_citybreak"))
        .args(args)
        .output()
        .expect("citybreak should start")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be utf-8")
}

#[test]
fn short_budget_reports_and_exits_cleanly() {
    let output = citybreak(&["--budget", "100"]);

    assert!(output.status.success(), "exit status {:?}", output.status);
    let text = stdout(&output);
    assert!(text.starts_with("Status: Infeasible\n"), "stdout: {text}");
    assert!(text.contains("Model is not optimal under budget 100 €."));
}

#[test]
fn default_run_prints_breakdown() {
    let output = citybreak(&[]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Status: Optimal\n"));
    assert!(text.contains("Minimum total cost (€): 296.50\n"));
    assert!(text.contains("Budget remaining (€): 3.50\n"));
}

#[test]
fn budget_flag_overrides_scenario_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "budget = 100.0").expect("write scenario");
    let path = file.path().to_str().expect("utf-8 path");

    let from_file = stdout(&citybreak(&["--config", path]));
    assert!(from_file.starts_with("Status: Infeasible\n"));

    let overridden = citybreak(&["--config", path, "--budget", "500"]);
    assert!(overridden.status.success());
    let text = stdout(&overridden);
    assert!(text.starts_with("Status: Optimal\n"));
    assert!(text.contains("Budget limit (€): 500\n"));
}

#[test]
fn json_output_is_tagged() {
    let output = citybreak(&["--json"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["outcome"], "planned");
    assert_eq!(json["transport"], "Train");
    assert_eq!(json["accommodation"], "Hostel");
    assert_eq!(json["attractions"], 3);
}

#[test]
fn json_output_for_short_budget() {
    let output = citybreak(&["--json", "--budget", "-20"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["outcome"], "not_optimal");
    assert_eq!(json["status"], "Infeasible");
    assert_eq!(json["budget"], -20.0);
}

#[test]
fn non_finite_budget_is_rejected() {
    let output = citybreak(&["--budget", "nan"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_scenario_file_fails() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "[costs]\nflight = -1.0").expect("write scenario");
    let path = file.path().to_str().expect("utf-8 path");

    let output = citybreak(&["--config", path]);
    assert!(!output.status.success());
}
