use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// The fixed date every harness command treats as today.
pub const TODAY: &str = "20240126";

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("scheduler.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("recur").expect("Failed to find recur binary");

        // Keep any config.toml in the developer's checkout out of the picture.
        cmd.current_dir(self.temp_dir.path());
        cmd.env("RECUR_DATABASE_PATH", &self.db_path);
        cmd.env_remove("RUST_LOG");

        cmd
    }

    /// Get the database path for this test instance
    #[allow(dead_code)]
    pub fn db_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Run with `--today` pinned and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command()
            .args(["--today", TODAY])
            .args(args)
            .assert()
            .success()
    }

    /// Run with `--today` pinned and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command()
            .args(["--today", TODAY])
            .args(args)
            .assert()
            .failure()
    }

    /// Run `list --json` and return the decoded task array
    pub fn list_json(&self, extra: &[&str]) -> Vec<serde_json::Value> {
        let mut args = vec!["list", "--json"];
        args.extend_from_slice(extra);
        let output = self.run_success(&args).get_output().stdout.clone();
        let body: serde_json::Value =
            serde_json::from_slice(&output).expect("list --json should print JSON");
        body["tasks"].as_array().cloned().unwrap_or_default()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output contains task table headers
    #[allow(dead_code)]
    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Repeat"))
    }

    /// Predicate to check if output indicates successful task creation
    #[allow(dead_code)]
    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓").and(predicate::str::contains("Created task"))
    }

    /// Predicate to check if output contains error messages
    #[allow(dead_code)]
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
