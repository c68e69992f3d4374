//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including test
//! environment setup with temporary directories and command builders.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the roomer data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created yet; roomer will create it on
    /// first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("roomer-data");

        Self { temp_dir, data_dir }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment variables that would leak host configuration into the
    /// test are cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("roomer").expect("Failed to find roomer binary");
        cmd.env_remove("ROOMER_DATA_DIR");
        cmd.env_remove("ROOMER_CONFIG");
        cmd.env_remove("ROOMER_BUSY_TIMEOUT");
        cmd.env_remove("ROOMER_LOG_MODE");
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Create a booking and return its identifier.
    ///
    /// # Panics
    ///
    /// Panics if the book command fails or prints an unexpected line.
    pub fn book_simple(&self, room: u64, from: &str, to: &str) -> u64 {
        let output = self
            .command()
            .arg("book")
            .arg("--room")
            .arg(room.to_string())
            .arg("--from")
            .arg(from)
            .arg("--to")
            .arg(to)
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        // Output lines look like: "#12 room 101 2030-01-10 -> 2030-01-15 ..."
        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout
            .trim()
            .strip_prefix('#')
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|id| id.parse().ok())
            .expect("Output does not start with a booking id")
    }
}
