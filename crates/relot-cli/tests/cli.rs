//! End-to-end tests for the relot binary, using the OCR-dump input path
//! so no models are needed.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_dump(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn scan_text_dump_extracts_fields() {
    let dump = write_dump(
        "Order placed January 12\n\
         Sold by Resale Partner\n\
         Cole Haan Men's Grand Crosscourt Sneaker (M)\n\
         Qty: 2\n\
         Total: $89.99\n\
         Ship to: John Smith - CA 90210\n\
         Thank you for shopping\n",
    );

    Command::cargo_bin("relot")
        .unwrap()
        .args(["scan"])
        .arg(dump.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cole Haan Men's Grand Crosscourt Sneaker (M)",
        ))
        .stdout(predicate::str::contains("89.99"))
        .stdout(predicate::str::contains("\"quantity\": 2"));
}

#[test]
fn scan_text_dump_without_name_reports_warning() {
    let dump = write_dump("Order #12345\nTotal: $5.00\n");

    Command::cargo_bin("relot")
        .unwrap()
        .args(["scan"])
        .arg(dump.path())
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no name extracted)"))
        .stderr(predicate::str::contains("acceptance threshold"));
}

#[test]
fn scan_missing_file_fails() {
    Command::cargo_bin("relot")
        .unwrap()
        .args(["scan", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_show_prints_defaults() {
    Command::cargo_bin("relot")
        .unwrap()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min_name_score"));
}
