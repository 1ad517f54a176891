#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn cli(workbook: &Path) -> Command {
    let mut cmd = Command::cargo_bin("garde-cli").unwrap();
    cmd.arg("--workbook").arg(workbook);
    cmd
}

fn seed_workbook(dir: &Path, staff: &str) -> std::path::PathBuf {
    let workbook = dir.join("garde.json");
    let staff_csv = dir.join("staff.csv");
    fs::write(&staff_csv, staff).unwrap();
    cli(&workbook)
        .args(["import-staff", "--csv"])
        .arg(&staff_csv)
        .assert()
        .success();
    workbook
}

#[test]
fn generate_check_and_export_month() {
    let dir = tempdir().unwrap();
    let workbook = seed_workbook(dir.path(), "name,count\nalice,0\nbob,0\ncarol,0\ndave,0\n");

    let holidays = dir.path().join("holidays.csv");
    fs::write(&holidays, "date\n2024/06/12\n").unwrap();
    cli(&workbook)
        .args(["import-holidays", "--csv"])
        .arg(&holidays)
        .assert()
        .success();

    let vacations = dir.path().join("vacations.csv");
    fs::write(
        &vacations,
        "name,apr,may,jun,jul,aug,sep,oct,nov,dec,jan,feb,mar\nalice,,,\"1,2 x\",,,,,,,,,\n",
    )
    .unwrap();
    cli(&workbook)
        .args(["import-vacations", "--csv"])
        .arg(&vacations)
        .assert()
        .success();

    cli(&workbook)
        .args(["generate", "--year", "2024", "--month", "6", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06: 30 day(s) assigned"))
        .stderr(predicate::str::contains("\"x\""));

    cli(&workbook)
        .args(["check", "--year", "2024", "--month", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations"));

    let out_csv = dir.path().join("june.csv");
    cli(&workbook)
        .args(["list", "--year", "2024", "--month", "6", "--out-csv"])
        .arg(&out_csv)
        .assert()
        .success();
    let exported = fs::read_to_string(&out_csv).unwrap();
    assert_eq!(exported.lines().count(), 31);
    assert!(exported.contains("2024-06-12,Wed,holiday,"));
    assert!(!exported.contains("2024-06-01,Sat,saturday,alice"));

    cli(&workbook)
        .arg("ledger")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice |"));
}

#[test]
fn generate_without_staff_is_rejected() {
    let dir = tempdir().unwrap();
    cli(&dir.path().join("garde.json"))
        .args(["generate", "--year", "2024", "--month", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staff roster is empty"));
}

#[test]
fn invalid_month_is_rejected() {
    let dir = tempdir().unwrap();
    let workbook = seed_workbook(dir.path(), "name\nalice\nbob\ncarol\n");
    cli(&workbook)
        .args(["generate", "--year", "2024", "--month", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month must be within 1..=12"));
}

#[test]
fn unsatisfiable_day_reports_date_and_role() {
    let dir = tempdir().unwrap();
    let workbook = seed_workbook(dir.path(), "name\nalice\nbob\n");

    // samedi 1er : deux personnes ; dimanche 2 : plus personne pour le jour
    cli(&workbook)
        .args(["generate", "--year", "2024", "--month", "6", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no eligible staff for day duty on 2024-06-02",
        ));

    let saved = fs::read_to_string(&workbook).unwrap();
    assert!(saved.contains("\"rosters\": []"));

    cli(&workbook)
        .args([
            "generate", "--year", "2024", "--month", "6", "--seed", "1", "--keep-partial",
        ])
        .assert()
        .failure();
    cli(&workbook)
        .args(["list", "--year", "2024", "--month", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-01 |"));
}

#[test]
fn finalized_month_is_left_alone() {
    let dir = tempdir().unwrap();
    let workbook = seed_workbook(dir.path(), "name\nalice\nbob\ncarol\n");

    cli(&workbook)
        .args(["generate", "--year", "2024", "--month", "7", "--seed", "3"])
        .assert()
        .success();
    cli(&workbook)
        .args(["finalize", "--year", "2024", "--month", "7"])
        .assert()
        .success();
    let before = fs::read_to_string(&workbook).unwrap();

    cli(&workbook)
        .args(["generate", "--year", "2024", "--month", "7", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finalized, nothing to do"));
    assert_eq!(before, fs::read_to_string(&workbook).unwrap());
}

#[test]
fn check_uses_rules_stored_with_the_roster() {
    let dir = tempdir().unwrap();
    let workbook = seed_workbook(dir.path(), "name\nalice\nbob\ncarol\n");

    for seed in ["1", "2", "3", "4", "5"] {
        cli(&workbook)
            .args([
                "generate", "--year", "2024", "--month", "6", "--seed", seed,
                "--day-carry", "next-day-only",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("2024-06: 30 day(s) assigned"))
            .stdout(predicate::str::contains("garde.json"));

        cli(&workbook)
            .args(["check", "--year", "2024", "--month", "6"])
            .assert()
            .success()
            .stdout(predicate::str::contains("OK: no violations"));
    }

    let saved = fs::read_to_string(&workbook).unwrap();
    assert!(saved.contains("\"day_carry\": \"next-day-only\""));
}
