// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::{NamedTempFile, TempDir};

/// Run the chunksum binary with the given arguments.
///
/// HOME and XDG_CONFIG_HOME point into an empty directory so user config
/// files on the test machine never leak into the run.
pub fn run_chunksum(args: &[&str]) -> (String, String, i32) {
    let isolated_home = TempDir::new().expect("Failed to create temp home");

    let output = Command::new(env!("CARGO_BIN_EXE_chunksum"))
        .args(args)
        .env("HOME", isolated_home.path())
        .env("XDG_CONFIG_HOME", isolated_home.path().join(".config"))
        .current_dir(isolated_home.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute chunksum");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Write `content` to a temp file and run `chunksum [extra_args] <file> <workers>`
pub fn run_chunksum_with_file(
    content: &str,
    workers: &str,
    extra_args: &[&str],
) -> (String, String, i32) {
    let temp_file = create_temp_file(content);
    let path = temp_file.path().to_str().unwrap();

    let mut full_args = extra_args.to_vec();
    full_args.push(path);
    full_args.push(workers);

    run_chunksum(&full_args)
}

/// Helper function to create a temporary file with content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    create_temp_file_bytes(content.as_bytes())
}

pub fn create_temp_file_bytes(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(content)
        .expect("Failed to write to temp file");
    temp_file.flush().expect("Failed to flush temp file");
    temp_file
}

/// JSON array with `count` records where record i is {"a": i, "b": 2 * i}
pub fn generate_records(count: usize) -> String {
    let records: Vec<String> = (0..count)
        .map(|i| format!(r#"{{"a":{},"b":{}}}"#, i, 2 * i))
        .collect();
    format!("[{}]", records.join(","))
}

/// Sum of `generate_records(count)`
pub fn expected_generated_sum(count: usize) -> i64 {
    (0..count as i64).map(|i| 3 * i).sum()
}

/// Extract the value of the "Total Sum: N" line
pub fn parse_total_sum(stdout: &str) -> Option<i64> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Total Sum: "))
        .and_then(|value| value.trim().parse().ok())
}
