use assert_cmd::Command;
use camino::{Utf8Path, Utf8PathBuf};
use predicates::prelude::*;
use shut_test_util::normalized_report;
use tempfile::TempDir;

#[allow(deprecated)]
fn shut_cmd() -> Command {
    Command::cargo_bin("shut").unwrap()
}

fn write_file(path: &Utf8Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, content).expect("write file");
}

fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
}

const COMPLETE_PACKAGE: &str = r#"[project]
name = "NAME"
version = "1.0.0"
license = "MIT"
readme = "README.md"
authors = [{ name = "Jane Doe" }]

[project.urls]
homepage = "https://example.org"
"#;

fn package(name: &str) -> String {
    COMPLETE_PACKAGE.replace("NAME", name)
}

/// Monorepo with two complete packages; `single-version` is off.
fn clean_monorepo() -> (TempDir, Utf8PathBuf) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&tmp);
    write_file(
        &root.join("pyproject.toml"),
        "[tool.shut.monorepo]\nname = \"mono\"\nversion = \"1.0.0\"\n",
    );
    write_file(&root.join("alpha/pyproject.toml"), &package("alpha"));
    write_file(&root.join("beta/pyproject.toml"), &package("beta"));
    (tmp, root)
}

#[test]
fn clean_monorepo_passes() {
    let (_tmp, root) = clean_monorepo();
    shut_cmd()
        .args(["--repo-root", root.as_str(), "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shut check: PASS"))
        .stdout(predicate::str::contains("[SKIP] MonorepoChecker/inconsistent-single-version"));
}

#[test]
fn bad_directory_fails_with_exit_two() {
    let (_tmp, root) = clean_monorepo();
    write_file(&root.join("bar/pyproject.toml"), &package("foo"));

    shut_cmd()
        .args(["--repo-root", root.as_str(), "check"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "package name is 'foo' but directory name is 'bar'",
        ))
        .stdout(predicate::str::contains("shut check: FAIL"));
}

#[test]
fn warnings_fail_only_with_fail_on_warning() {
    let (_tmp, root) = clean_monorepo();
    write_file(
        &root.join("gamma/pyproject.toml"),
        "[project]\nname = \"gamma\"\nreadme = \"README.md\"\nlicense = \"MIT\"\nauthors = [{ name = \"J\" }]\n",
    );

    shut_cmd()
        .args(["--repo-root", root.as_str(), "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no project url specified"));

    shut_cmd()
        .args(["--repo-root", root.as_str(), "check", "--fail-on", "warning"])
        .assert()
        .code(2);

    shut_cmd()
        .args([
            "--repo-root",
            root.as_str(),
            "check",
            "--fail-on",
            "warning",
            "--disable",
            "missing-url",
        ])
        .assert()
        .success();
}

#[test]
fn config_table_is_honoured() {
    let (_tmp, root) = clean_monorepo();
    write_file(
        &root.join("pyproject.toml"),
        "[tool.shut.monorepo]\nname = \"mono\"\n\n[tool.shut.check]\nfail-on = \"warning\"\n",
    );
    write_file(&root.join("gamma/pyproject.toml"), "[project]\nname = \"gamma\"\n");

    shut_cmd()
        .args(["--repo-root", root.as_str(), "check"])
        .assert()
        .code(2);
}

#[test]
fn unknown_disabled_check_is_a_runtime_error() {
    let (_tmp, root) = clean_monorepo();
    shut_cmd()
        .args(["--repo-root", root.as_str(), "check", "--disable", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown check id: nope"));
}

#[test]
fn missing_manifest_is_a_runtime_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = utf8_root(&tmp);
    shut_cmd()
        .args(["--repo-root", root.as_str(), "check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("shut error"));
}

#[test]
fn invalid_member_is_reported() {
    let (_tmp, root) = clean_monorepo();
    write_file(&root.join("broken/pyproject.toml"), "[project\n");

    shut_cmd()
        .args(["--repo-root", root.as_str(), "check"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[ERROR] MonorepoChecker/invalid-package"));
}

#[test]
fn json_report_is_written_and_renderable() {
    let (tmp, root) = clean_monorepo();
    write_file(&root.join("bar/pyproject.toml"), &package("foo"));
    let report_path = utf8_root(&tmp).join("out/report.json");

    shut_cmd()
        .args([
            "--repo-root",
            root.as_str(),
            "check",
            "--format",
            "json",
            "--report-out",
            report_path.as_str(),
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"schema\": \"shut.check.v1\""));

    let text = std::fs::read_to_string(&report_path).expect("read report");
    let report = normalized_report(&text).expect("report json");
    assert_eq!(report["schema"], "shut.check.v1");
    assert_eq!(report["tool"]["version"], "__VERSION__");
    assert_eq!(report["run"]["started_at"], "__TIMESTAMP__");
    assert_eq!(report["status"], "error");
    assert_eq!(report["passed"], false);

    let records = report["records"].as_array().expect("records");
    assert_eq!(records[0]["checker"], "MonorepoChecker");
    assert_eq!(records[0]["check_id"], "bad-package-directory");
    assert_eq!(records[0]["subject"]["kind"], "package");
    assert_eq!(records[0]["subject"]["name"], "foo");

    shut_cmd()
        .args(["render", "--report", report_path.as_str(), "--format", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::error file=bar/pyproject.toml::[MonorepoChecker/bad-package-directory]",
        ));
}

#[test]
fn running_twice_gives_the_same_normalized_report() {
    let (tmp, root) = clean_monorepo();
    let out = utf8_root(&tmp);
    let first = out.join("first.json");
    let second = out.join("second.json");

    for path in [&first, &second] {
        shut_cmd()
            .args([
                "--repo-root",
                root.as_str(),
                "check",
                "--report-out",
                path.as_str(),
            ])
            .assert()
            .success();
    }

    let a = normalized_report(&std::fs::read_to_string(&first).expect("read")).expect("json");
    let b = normalized_report(&std::fs::read_to_string(&second).expect("read")).expect("json");
    assert_eq!(a, b);
}
