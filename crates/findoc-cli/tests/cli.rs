//! End-to-end checks of the findoc binary.

use assert_cmd::Command;
use predicates::prelude::*;

const STATEMENT_CSV: &str = "\
Account No : 50100234567890\n\
Statement From : 01/01/2024 To : 31/01/2024\n\
Date,Narration,Chq./Ref.No.,Withdrawal Amt.,Deposit Amt.,Closing Balance\n\
15/01/2024,UPI-GROCERYMART,UPI401122,1250.00,,48750.00\n\
18/01/2024,NEFT-SALARY,N018240012,,55000.00,103750.00\n";

#[test]
fn processes_a_csv_statement_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.csv");
    std::fs::write(&path, STATEMENT_CSV).unwrap();

    Command::cargo_bin("findoc")
        .unwrap()
        .args(["process", path.to_str().unwrap(), "--kind", "statement"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"transactions\""))
        .stdout(predicate::str::contains("UPI-GROCERYMART"))
        .stdout(predicate::str::contains("50100234567890"));
}

#[test]
fn csv_output_lists_one_row_per_transaction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.csv");
    std::fs::write(&path, STATEMENT_CSV).unwrap();

    Command::cargo_bin("findoc")
        .unwrap()
        .args([
            "process",
            path.to_str().unwrap(),
            "--kind",
            "statement",
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("txn_date"))
        .stdout(predicate::str::contains("2024-01-15"))
        .stdout(predicate::str::contains("2024-01-18"));
}

#[test]
fn invoice_text_goes_through_the_fallback_matchers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.csv");
    std::fs::write(&path, "Invoice #,INV-77\nTotal,1180.00\n").unwrap();

    Command::cargo_bin("findoc")
        .unwrap()
        .args(["process", path.to_str().unwrap(), "--fallback-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-77"));
}

#[test]
fn unsupported_extension_fails_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "nothing").unwrap();

    Command::cargo_bin("findoc")
        .unwrap()
        .args(["process", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));
}

#[test]
fn config_show_prints_defaults() {
    Command::cargo_bin("findoc")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("allowed_extensions"));
}
