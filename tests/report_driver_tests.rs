//! End-to-end CLI tests over fixture profiling reports
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;

const ANVIL_PROF: &str = "tests/fixtures/anvil.prof";
const LEGACY_PROF: &str = "tests/fixtures/legacy.prof";
const TRUNCATED_PROF: &str = "tests/fixtures/truncated.prof";
const CORRUPT_PROF: &str = "tests/fixtures/corrupt.prof";

#[test]
fn test_cli_requires_path() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_report_tracked_cost_centres() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(ANVIL_PROF)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profiling results from"))
        .stdout(predicate::str::contains("31.5% time"))
        .stdout(predicate::str::contains("12.8% time"))
        .stdout(predicate::str::contains("48.2% time"))
        .stdout(predicate::str::contains("simplification   absent"));
}

#[test]
fn test_report_header_totals_shown() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(ANVIL_PROF)
        .assert()
        .success()
        .stdout(predicate::str::contains("total time 1.95 secs"))
        .stdout(predicate::str::contains("total alloc 2837744528 bytes"));
}

#[test]
fn test_report_legacy_format_without_src() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(LEGACY_PROF)
        .arg("--cost-centre")
        .arg("parsing")
        .assert()
        .success()
        .stdout(predicate::str::contains("62.0% time"));
}

#[test]
fn test_truncated_report_diagnosed_not_fatal() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(TRUNCATED_PROF)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error parsing profiling results from tests/fixtures/truncated.prof",
        ));
}

#[test]
fn test_corrupt_report_diagnoses_field() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(CORRUPT_PROF)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error parsing profiling results from"))
        .stdout(predicate::str::contains("%time"))
        .stdout(predicate::str::contains("?!?!"));
}

#[test]
fn test_strict_escalates_parse_failure() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg("--strict")
        .arg(CORRUPT_PROF)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_strict_passes_on_good_report() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg("--strict").arg(ANVIL_PROF).assert().success();
}

#[test]
fn test_good_report_after_bad_still_printed() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(CORRUPT_PROF)
        .arg(ANVIL_PROF)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error parsing profiling results from"))
        .stdout(predicate::str::contains("31.5% time"));
}

#[test]
fn test_json_format() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    let assert = cmd.arg("--format").arg("json").arg(ANVIL_PROF).assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let cost_centres = json["cost_centres"].as_array().unwrap();
    assert_eq!(cost_centres.len(), 4);
    assert_eq!(cost_centres[0]["name"], "parsing");
    assert_eq!(cost_centres[0]["found"], true);
    assert_eq!(cost_centres[0]["time_percent"], 31.5);
    assert_eq!(cost_centres[2]["name"], "simplification");
    assert_eq!(cost_centres[2]["found"], false);
}

#[test]
fn test_csv_format() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg("--format")
        .arg("csv")
        .arg(ANVIL_PROF)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "cost_centre,found,module,time_percent,alloc_percent,calls",
        ))
        .stdout(predicate::str::contains("parsing,true,Main,31.5,22.4,1"))
        .stdout(predicate::str::contains("simplification,false,,,,"));
}

#[test]
fn test_cost_centre_override() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg("--cost-centre")
        .arg("lexing")
        .arg("--cost-centre")
        .arg("nonexistent")
        .arg(ANVIL_PROF)
        .assert()
        .success()
        .stdout(predicate::str::contains("6.6% time"))
        .stdout(predicate::str::contains("nonexistent      absent"))
        .stdout(predicate::str::contains("parsing").not());
}

#[test]
fn test_results_directory_mode() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(ANVIL_PROF, dir.path().join("run1.prof")).unwrap();
    std::fs::copy(LEGACY_PROF, dir.path().join("run2.prof")).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("run1.prof"))
        .stdout(predicate::str::contains("run2.prof"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn test_empty_results_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiling reports found in"));
}

#[test]
fn test_missing_file_is_an_error() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("medir");
    cmd.arg("does/not/exist.prof")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read profiling report"));
}
