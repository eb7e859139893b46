use assert_cmd::Command;
use insta::assert_snapshot;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    Command::new(assert_cmd::cargo::cargo_bin!("retab"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMANDS:"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("pipelines"));
}

#[test]
fn test_run_help_shows_override_sections() {
    Command::new(assert_cmd::cargo::cargo_bin!("retab"))
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path Overrides"))
        .stdout(predicate::str::contains("Rule Selection"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("retab run cpm --enable vertical-bar"));
}

#[test]
fn test_run_long_help_documents_environment() {
    Command::new(assert_cmd::cargo::cargo_bin!("retab"))
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RETAB_DEFAULT_PIPELINE"))
        .stdout(predicate::str::contains("RETAB_LOG_DIR"));

    Command::new(assert_cmd::cargo::cargo_bin!("retab"))
        .args(["run", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RETAB_LOG_DIR").not());
}

#[test]
fn test_version_output() {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("retab"))
        .arg("--version")
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_snapshot!(stdout.trim().replace(retab::VERSION, "[version]"), @"retab [version]");
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    Command::new(assert_cmd::cargo::cargo_bin!("retab"))
        .assert()
        .failure()
        .code(2);
}
