//! End-to-end tests for the splitbook binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const CANONICAL_HEADER: &str =
    "ID,project,category,date,amount,description,participant,attachment,quantity,note";

fn ledger_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", CANONICAL_HEADER).unwrap();
    writeln!(file, "1,워크숍,식비,2025-03-01,10000,점심,김철수,,2,").unwrap();
    writeln!(file, "2,워크숍,교통,2025-03-02,5000,버스,이영희,,1,").unwrap();
    writeln!(file, "3,학회,숙박,2025-03-03,80000,호텔,김철수,,1,2인실").unwrap();
    file
}

fn splitbook() -> Command {
    Command::cargo_bin("splitbook").unwrap()
}

#[test]
fn test_report_prints_summary_with_budget() {
    let ledger = ledger_file();
    let mut budget = NamedTempFile::new().unwrap();
    write!(budget, "{{\"total\": 200000}}").unwrap();

    splitbook()
        .arg("report")
        .arg(ledger.path())
        .arg("--budget")
        .arg(budget.path())
        .assert()
        .success()
        // total spent = 10000*2 + 5000 + 80000 = 105,000
        .stdout(predicate::str::contains("집행 총계: ￦105,000"))
        .stdout(predicate::str::contains("잔여 예산: ￦95,000"));
}

#[test]
fn test_report_filtered_by_project() {
    let ledger = ledger_file();
    splitbook()
        .arg("report")
        .arg(ledger.path())
        .args(["--project", "워크숍"])
        .assert()
        .success()
        .stdout(predicate::str::contains("워크숍"))
        .stdout(predicate::str::contains("집행 총계: ￦25,000"));
}

#[test]
fn test_settle_splits_equally() {
    let ledger = ledger_file();
    splitbook()
        .arg("settle")
        .arg(ledger.path())
        .assert()
        .success()
        // 95,000 raw total over two participants
        .stdout(predicate::str::contains("총 지출액: ￦95,000"))
        .stdout(predicate::str::contains("참여자 수: 2"))
        .stdout(predicate::str::contains("김철수"))
        .stdout(predicate::str::contains("이영희"));
}

#[test]
fn test_totals_by_category() {
    let ledger = ledger_file();
    splitbook()
        .arg("totals")
        .arg(ledger.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("숙박: 80,000"))
        .stdout(predicate::str::contains("식비: 10,000"));
}

#[test]
fn test_bulk_import_missing_amount_fails_naming_column() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "project,category,date,description,participant").unwrap();
    writeln!(input, "워크숍,식비,2025-03-01,점심,김철수").unwrap();

    splitbook()
        .arg("import")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required columns"))
        .stderr(predicate::str::contains("amount"));
}

#[test]
fn test_export_import_round_trip() {
    let ledger = ledger_file();
    let exported = NamedTempFile::new().unwrap();

    splitbook()
        .arg("export")
        .arg(ledger.path())
        .args(["--output"])
        .arg(exported.path())
        .assert()
        .success();

    // re-import the export as a full replacement and export again
    splitbook()
        .arg("import")
        .arg(exported.path())
        .args(["--mode", "replace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,워크숍,식비,2025-03-01,10000"))
        .stdout(predicate::str::contains("3,학회,숙박,2025-03-03,80000"));
}

#[test]
fn test_delete_project_requires_password() {
    let ledger = ledger_file();
    splitbook()
        .arg("delete-project")
        .arg(ledger.path())
        .arg("학회")
        .args(["--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("access denied"));
}

#[test]
fn test_delete_project_cascades() {
    let ledger = ledger_file();
    splitbook()
        .arg("delete-project")
        .arg(ledger.path())
        .arg("학회")
        .args(["--password", "admin123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("워크숍"))
        .stdout(predicate::str::contains("학회").not());
}

#[test]
fn test_scan_extracts_date_and_amount() {
    let mut text = NamedTempFile::new().unwrap();
    writeln!(text, "영수증 2025.03.14 합계 12,000원").unwrap();

    splitbook()
        .arg("scan")
        .arg(text.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03-14"))
        .stdout(predicate::str::contains("12,000"));
}
