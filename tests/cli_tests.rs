use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

mod test_helpers;
use test_helpers::{add_entry, diary_command};

#[test]
fn test_cli_requires_subcommand() {
    let dir = tempdir().unwrap();
    diary_command(&dir.path().join("diary.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_add_persists_entry() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");

    diary_command(&diary_file)
        .args([
            "add",
            "--author",
            "Alice",
            "--destination",
            "Backpacking Europe",
            "--activity",
            "Hiking",
            "--rating",
            "8.5",
            "--title",
            "Alps Adventure",
            "--text",
            "Climbed several peaks.",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added entry 'Alps Adventure'"));

    let stored: Value = serde_json::from_str(&fs::read_to_string(&diary_file).unwrap()).unwrap();
    let records = stored.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Alps Adventure");
    assert_eq!(records[0]["activity"], "hiking");
    assert_eq!(records[0]["rating"], 8.5);
    assert!(records[0]["timeWritten"].is_string());
}

#[test]
fn test_cli_add_reads_text_from_stdin() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");

    diary_command(&diary_file)
        .args([
            "add",
            "--author",
            "Alice",
            "--destination",
            "Oslo",
            "--activity",
            "dining",
            "--rating",
            "6",
            "--title",
            "Harbour",
        ])
        .write_stdin("Fresh shrimp\non the pier\n")
        .assert()
        .success();

    diary_command(&diary_file)
        .args(["show", "Harbour"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Main entry:\nFresh shrimp\non the pier"));
}

#[test]
fn test_cli_duplicate_title_fails() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");
    add_entry(&diary_file, "Trip", "Alice", "Oslo", "5");

    diary_command(&diary_file)
        .args([
            "add",
            "--author",
            "Bob",
            "--destination",
            "Bergen",
            "--activity",
            "dining",
            "--rating",
            "3",
            "--title",
            "Trip",
            "--text",
            "",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    diary_command(&diary_file)
        .args(["show", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Author: Alice"));
}

#[test]
fn test_cli_rejects_out_of_range_rating() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");

    diary_command(&diary_file)
        .args([
            "add",
            "--author",
            "Alice",
            "--destination",
            "Oslo",
            "--activity",
            "dining",
            "--rating",
            "10.5",
            "--title",
            "Too good",
            "--text",
            "",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rating must be between 0 and 10"));

    assert_eq!(fs::read_to_string(&diary_file).unwrap(), "[]");
}

#[test]
fn test_cli_list_filters_and_sorts() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");
    add_entry(&diary_file, "Peaks", "Alice", "Alps", "9");
    add_entry(&diary_file, "Rain", "Alice", "Bergen", "2");
    add_entry(&diary_file, "Fjord", "Bob", "bergen", "7");

    let output = diary_command(&diary_file)
        .args(["list", "--destination", "BERGEN", "--sort", "rating"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Peaks"));
    let rain = stdout.find("Rain").unwrap();
    let fjord = stdout.find("Fjord").unwrap();
    assert!(rain < fjord, "Lower rating should be listed first:\n{}", stdout);

    diary_command(&diary_file)
        .args(["list", "--author", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_cli_list_time_window_must_be_ordered() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");

    diary_command(&diary_file)
        .args(["list", "--from", "2024-06-01", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be before"));

    diary_command(&diary_file)
        .args(["list", "--from", "2024-06-01"])
        .assert()
        .failure();
}

#[test]
fn test_cli_edit_retitles_entry() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");
    add_entry(&diary_file, "Draft", "Alice", "Oslo", "5");

    diary_command(&diary_file)
        .args(["edit", "Draft", "--title", "Final", "--rating", "6.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated entry 'Final'"));

    diary_command(&diary_file)
        .args(["show", "Draft"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry titled 'Draft'"));

    diary_command(&diary_file)
        .args(["show", "Final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rating: 6.5"));
}

#[test]
fn test_cli_remove_and_clear() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");
    add_entry(&diary_file, "One", "Alice", "Oslo", "5");
    add_entry(&diary_file, "Two", "Alice", "Oslo", "5");

    diary_command(&diary_file)
        .args(["remove", "One"])
        .assert()
        .success();
    diary_command(&diary_file)
        .args(["remove", "One"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry titled 'One'"));

    diary_command(&diary_file)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
    diary_command(&diary_file)
        .args(["show", "Two"])
        .assert()
        .success();

    diary_command(&diary_file)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 entries"));
    assert_eq!(fs::read_to_string(&diary_file).unwrap().trim(), "[]");
}

#[test]
fn test_cli_seed_and_distinct() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");

    diary_command(&diary_file)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 64 sample entries"));

    diary_command(&diary_file)
        .args(["distinct", "destination"])
        .assert()
        .success()
        .stdout("Bergen\nNarvik\nOslo\nStockholm\n");

    diary_command(&diary_file)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing was seeded"));

    let stored: Value = serde_json::from_str(&fs::read_to_string(&diary_file).unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 64);
}

#[test]
fn test_cli_file_flag_overrides_environment() {
    let dir = tempdir().unwrap();
    let env_file = dir.path().join("env.json");
    let flag_file = dir.path().join("flag.json");

    diary_command(&env_file)
        .args(["--file", flag_file.to_str().unwrap(), "seed"])
        .assert()
        .success();

    assert!(flag_file.exists());
    assert!(!env_file.exists());
}

#[test]
fn test_cli_corrupt_file_is_reported_and_kept() {
    let dir = tempdir().unwrap();
    let diary_file = dir.path().join("diary.json");
    fs::write(&diary_file, "{not json").unwrap();

    diary_command(&diary_file)
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is corrupt"));

    assert_eq!(fs::read_to_string(&diary_file).unwrap(), "{not json");
}
