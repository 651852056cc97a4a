use std::process::Command;

fn xtask(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .args(args)
        .output()
        .expect("run xtask")
}

const SAMPLE_REPORT: &str = r#"{
  "schema": "shut.check.v1",
  "tool": { "name": "shut", "version": "0.1.0" },
  "run": { "started_at": "2024-01-01T00:00:00Z", "ended_at": "2024-01-01T00:00:01Z", "duration_ms": 1000 },
  "status": "error",
  "passed": false,
  "counts": { "ok": 0, "recommendation": 0, "warning": 0, "error": 1, "skipped": 1 },
  "records": [
    {
      "checker": "MonorepoChecker",
      "check_id": "bad-package-directory",
      "status": "error",
      "message": "package name is 'foo' but directory name is 'bar'",
      "subject": { "kind": "package", "name": "foo", "manifest": "bar/pyproject.toml" }
    },
    {
      "checker": "MonorepoChecker",
      "check_id": "inconsistent-single-version",
      "status": "skipped",
      "message": ""
    }
  ]
}
"#;

#[test]
fn xtask_help_runs() {
    let output = xtask(&["help"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn explain_coverage_passes() {
    let output = xtask(&["explain-coverage"]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn print_schema_ids_lists_report_schema() {
    let output = xtask(&["print-schema-ids"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shut.check.v1"));
    assert!(stdout.contains("shut.config.v1"));
}

#[test]
fn normalize_report_replaces_timestamps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");
    std::fs::write(&path, SAMPLE_REPORT).expect("write report");

    let output = xtask(&["normalize-report", path.to_str().expect("utf8 path")]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("__TIMESTAMP__"));
    assert!(stdout.contains("__VERSION__"));
}

#[test]
fn unknown_command_fails() {
    let output = xtask(&["frobnicate"]);
    assert!(!output.status.success());
}
