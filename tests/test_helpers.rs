#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Creates a `Command` for the `travel-diary` binary with a clean environment
/// that stores the diary at `diary_file`.
pub fn diary_command(diary_file: &Path) -> Command {
    let mut cmd = Command::cargo_bin("travel-diary").expect("travel-diary binary not built");
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HOME", diary_file.parent().unwrap_or(diary_file))
        .env("TRAVEL_DIARY_FILE", diary_file);
    cmd
}

/// Adds an entry through the binary and asserts success.
pub fn add_entry(diary_file: &Path, title: &str, author: &str, destination: &str, rating: &str) {
    diary_command(diary_file)
        .args([
            "add",
            "--author",
            author,
            "--destination",
            destination,
            "--activity",
            "Hiking",
            "--rating",
            rating,
            "--title",
            title,
            "--text",
            "Walked all day",
        ])
        .assert()
        .success();
}
