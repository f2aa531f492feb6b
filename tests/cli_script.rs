use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").expect("binary builds");
    cmd.env("EXPENSE_CORE_HOME", temp.path())
        .env("EXPENSE_CORE_CLI_SCRIPT", "1");
    cmd
}

#[test]
fn script_session_records_and_reports() {
    let temp = TempDir::new().expect("temp dir");
    cli(&temp)
        .write_stdin(
            "login tester@example.com\n\
             add 120 2 UPI 2024-06-02 swiggy order\n\
             add 200 groceries Cash dmart run\n\
             budget 2 100\n\
             budgets\n\
             dashboard\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as tester@example.com"))
        .stdout(predicate::str::contains("Expense added."))
        .stdout(predicate::str::contains("Budget for Mess/Food set to ₹100."))
        .stdout(predicate::str::contains("Budget Manager"));
}

#[test]
fn commands_require_a_session() {
    let temp = TempDir::new().expect("temp dir");
    cli(&temp)
        .write_stdin("dashboard\nexit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Sign in first"));
}

#[test]
fn unknown_commands_suggest_the_closest_name() {
    let temp = TempDir::new().expect("temp dir");
    cli(&temp)
        .write_stdin("bugets\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggestion: `budgets`?"))
        .stderr(predicate::str::contains("Unknown command `bugets`"));
}

#[test]
fn session_is_restored_between_runs() {
    let temp = TempDir::new().expect("temp dir");
    cli(&temp)
        .write_stdin("login tester@example.com\nexit\n")
        .assert()
        .success();

    cli(&temp)
        .write_stdin("whoami\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("tester@example.com"));
}

#[test]
fn deleting_by_unknown_id_reports_no_match() {
    let temp = TempDir::new().expect("temp dir");
    cli(&temp)
        .write_stdin("login tester@example.com\ndelete deadbeef\nexit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("No expense matches id `deadbeef`"));
}
