use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("piley").expect("Failed to find piley binary");

        // Run outside the crate so no stray piley.toml is picked up.
        cmd.current_dir(self.temp_dir.path());
        cmd.env("PILEY_DATABASE_PATH", &self.db_path);
        cmd.env("PILEY_TIMEZONE", "UTC");
        cmd.env_remove("PILEY_LOG");

        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Runs a command and returns its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.run_success(args).get_output().stdout.clone();
        String::from_utf8(output).expect("stdout is not UTF-8")
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// A reminder far enough in the future to stay pending.
    pub const FUTURE_REMINDER: &'static str = "2099-01-01 09:00";

    pub fn fifo_pile_args() -> Vec<&'static str> {
        vec!["pile", "add", "Queue", "--mode", "fifo", "--description", "First in, first out"]
    }

    pub fn recurring_task_args() -> Vec<&'static str> {
        vec![
            "add", "Stretch",
            "--remind", Self::FUTURE_REMINDER,
            "--every", "daily",
        ]
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Status"))
    }

    pub fn has_pile_table_headers() -> impl Predicate<str> {
        predicate::str::contains("Name")
            .and(predicate::str::contains("Mode"))
            .and(predicate::str::contains("Limit"))
    }

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created task").or(predicate::str::contains("Created recurring task"))
    }

    pub fn task_completed_successfully() -> impl Predicate<str> {
        predicate::str::contains("Completed task")
    }

    /// Checks that `first` appears before `second` in the output.
    pub fn appears_before(first: &'static str, second: &'static str) -> impl Predicate<str> {
        predicate::function(move |out: &str| match (out.find(first), out.find(second)) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        })
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
