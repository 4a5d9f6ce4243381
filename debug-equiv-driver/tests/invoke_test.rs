// SPDX-License-Identifier: Apache-2.0

use pretty_assertions::assert_eq;
use std::process::{Command, Output};
use test_case::test_case;

fn run_driver(args: &[&str]) -> Output {
    let command_path = env!("CARGO_BIN_EXE_debug-equiv-driver");
    Command::new(command_path)
        .args(args)
        .env("RUST_LOG", std::env::var("RUST_LOG").unwrap_or_default())
        .output()
        .expect("Failed to run debug-equiv-driver")
}

fn assert_success(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test_case("42"; "in span")]
#[test_case("-5"; "below span")]
#[test_case("0"; "first iteration")]
#[test_case("99"; "last iteration")]
#[test_case("1000"; "above span")]
fn test_check_input_proves(input: &str) {
    let output = run_driver(&["check-input", "--input", input]);
    assert_eq!(assert_success(&output), "success: proved over 1 input(s)");
}

#[test]
fn test_sweep_proves() {
    let output = run_driver(&["sweep", "--lo=-200", "--hi=300"]);
    assert_eq!(assert_success(&output), "success: proved over 500 input(s)");
}

#[test]
fn test_sweep_rejects_empty_range() {
    let output = run_driver(&["sweep", "--lo=10", "--hi=10"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exhaustive range is empty"), "stderr: {}", stderr);
}

#[test]
fn test_sample_proves() {
    let output = run_driver(&["sample", "--seed=3", "--count=1000"]);
    assert_eq!(assert_success(&output), "success: proved over 1000 input(s)");
}

#[test]
fn test_boundary_proves_with_legacy_arithmetic_guard() {
    let output = run_driver(&["boundary", "--guard=arithmetic", "--arithmetic_level=1"]);
    assert_eq!(assert_success(&output), "success: proved over 11 input(s)");
}

#[test_case(&["--guard=arithmetic", "--arithmetic_level=2"]; "arithmetic level two")]
#[test_case(&["--guard=arithmetic", "--arithmetic_level=0"]; "arithmetic level zero")]
#[test_case(&["--threshold=warn"]; "notice above threshold")]
#[test_case(&["--level=debug", "--threshold=info"]; "debug above threshold")]
fn test_disarmed_guard_reports_counterexample(guard_args: &[&str]) {
    let mut args = vec!["check-input", "--input=42"];
    args.extend_from_slice(guard_args);
    let output = run_driver(&args);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("equivalence violation"), "stderr: {}", stderr);
    assert!(stderr.contains("input: 42"), "stderr: {}", stderr);
    assert!(stderr.contains("reference: 99"), "stderr: {}", stderr);
    assert!(stderr.contains("modified: 100"), "stderr: {}", stderr);
}

#[test]
fn test_disarmed_guard_agrees_outside_span() {
    let output = run_driver(&["check-input", "--input=-1", "--threshold=crit"]);
    assert_eq!(assert_success(&output), "success: proved over 1 input(s)");
}

#[test]
fn test_output_json() {
    let output = run_driver(&["check-input", "--input=42", "--output_json=true"]);
    let stdout = assert_success(&output);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["proved"], true);
    assert_eq!(report["inputs_checked"], 1);
    assert_eq!(report["guard_armed"], true);
    assert!(report["counterexample"].is_null());
}

#[test]
fn test_output_json_with_counterexample() {
    let output = run_driver(&[
        "check-input",
        "--input=0",
        "--threshold=error",
        "--output_json=true",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["proved"], false);
    assert_eq!(report["counterexample"]["input"], 0);
    assert_eq!(report["counterexample"]["reference"], 99);
    assert_eq!(report["counterexample"]["modified"], 100);
}

#[test]
fn test_invalid_level_is_reported() {
    let output = run_driver(&["check-input", "--input=1", "--level=loud"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value for --level"), "stderr: {}", stderr);
}

#[test]
fn test_config_file_supplies_guard() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("debug-equiv.toml");
    std::fs::write(
        &config_path,
        "[equiv]\nguard = \"arithmetic\"\narithmetic_level = 3\n",
    )
    .unwrap();
    let config_arg = format!("--config={}", config_path.to_str().unwrap());

    let output = run_driver(&[config_arg.as_str(), "check-input", "--input=7"]);
    assert_eq!(output.status.code(), Some(1));

    // Flags take precedence over the config file.
    let output = run_driver(&[
        config_arg.as_str(),
        "check-input",
        "--input=7",
        "--arithmetic_level=1",
    ]);
    assert_eq!(assert_success(&output), "success: proved over 1 input(s)");
}

#[test]
fn test_config_file_supplies_sample_settings() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("debug-equiv.toml");
    std::fs::write(&config_path, "[equiv]\nseed = 11\nsample_count = 64\n").unwrap();
    let config_arg = format!("--config={}", config_path.to_str().unwrap());
    let output = run_driver(&[config_arg.as_str(), "sample"]);
    assert_eq!(assert_success(&output), "success: proved over 64 input(s)");
}

#[test]
fn test_missing_config_file_is_reported() {
    let output = run_driver(&["--config=/nonexistent/debug-equiv.toml", "boundary"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config toml file does not exist"), "stderr: {}", stderr);
}

#[cfg(target_os = "linux")]
#[test]
fn test_strerror_subcommand() {
    let output = run_driver(&["strerror", "2"]);
    assert_eq!(assert_success(&output), "No such file or directory");
}

#[test]
fn test_gettext_subcommand_without_catalog() {
    let output = run_driver(&["gettext", "no translation for this"]);
    assert_eq!(assert_success(&output), "no translation for this");
}

#[test]
fn test_version_subcommand() {
    let output = run_driver(&["version"]);
    assert_eq!(assert_success(&output), env!("CARGO_PKG_VERSION"));
}
