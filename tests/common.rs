#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rts() -> Command {
    cargo_bin_cmd!("rtimestore")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimestore.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the DB and record two days
pub fn init_db_with_data(db_path: &str) {
    rts()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (date, start, end) in [
        ("2025-09-01", "09:00", "12:30"),
        ("2025-09-01", "13:30", "17:00"),
        ("2025-10-02", "08:00", "12:00"),
    ] {
        rts()
            .args(["--db", db_path, "add", date, "--in", start, "--out", end])
            .assert()
            .success();
    }
}
