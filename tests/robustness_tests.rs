mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use common::write_catalog;
use predicates::prelude::*;
use std::process::Command;

const FAST: [&str; 6] = [
    "--confirmation-delay-ms",
    "0",
    "--success-window-ms",
    "0",
    "--failure-window-ms",
    "0",
];

#[test]
fn test_malformed_catalog_rows_are_skipped() {
    let catalog = write_catalog(&[
        "1, Maize, John Kamau, 3500, 90kg bag, Nakuru",
        "2, Tomatoes, Mary Wanjiku, not_a_number, crate, Kiambu",
        "3, Potatoes, Peter Omondi, -5, 50kg bag, Molo",
        "4, Cabbage, Grace Achieng, 800, 10 heads, Eldoret",
    ]);

    let mut cmd = Command::new(cargo_bin!("farmconnect"));
    cmd.args(FAST)
        .arg("--catalog")
        .arg(catalog.path())
        .args(["--add", "1", "--add", "4", "--phone", "0712345678"])
        .args(["--success-rate", "1"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Skipping malformed listing"))
        .stdout(predicate::str::contains(",4300,0712345678,"));
}

#[test]
fn test_listing_missing_from_catalog() {
    let catalog = write_catalog(&[
        "1, Maize, John Kamau, 3500, 90kg bag, Nakuru",
        "2, Tomatoes, Mary Wanjiku, not_a_number, crate, Kiambu",
    ]);

    let mut cmd = Command::new(cargo_bin!("farmconnect"));
    cmd.args(FAST)
        .arg("--catalog")
        .arg(catalog.path())
        .args(["--add", "2", "--phone", "0712345678"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown listing"));
}

#[test]
fn test_invalid_phone_number() {
    let mut cmd = Command::new(cargo_bin!("farmconnect"));
    cmd.args(FAST).args(["--add", "1", "--phone", "123"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"))
        .stdout(predicate::str::contains("completed").not());
}

#[test]
fn test_success_rate_out_of_range() {
    let mut cmd = Command::new(cargo_bin!("farmconnect"));
    cmd.args(FAST)
        .args(["--add", "1", "--phone", "0712345678"])
        .args(["--success-rate", "1.5"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Success rate"));
}
