//! Common test utilities and helpers

use rowdiff::{DiffEvent, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding CSV inputs for one test
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the root path of the test fixture
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a CSV file from rows of unquoted cells
    pub fn create_csv(&self, name: &str, data: &[Vec<&str>]) -> Result<PathBuf> {
        let mut content = String::new();
        for row in data {
            content.push_str(&row.join(","));
            content.push('\n');
        }
        self.create_csv_raw(name, &content)
    }

    /// Create a CSV file with raw string content
    pub fn create_csv_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a keyed CSV with `rows` rows and `cols` value columns after `id`
    pub fn create_large_csv(&self, name: &str, rows: usize, cols: usize) -> Result<PathBuf> {
        let mut content = String::from("id");
        for col in 0..cols {
            content.push_str(&format!(",col_{}", col));
        }
        content.push('\n');

        for row in 0..rows {
            content.push_str(&row.to_string());
            for col in 0..cols {
                content.push_str(&format!(",value_{}_{}", row, col));
            }
            content.push('\n');
        }

        self.create_csv_raw(name, &content)
    }
}

/// Helper for running the CLI in-process with output captured in a file
pub struct CliTestRunner {
    fixture: TestFixture,
}

impl CliTestRunner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: TestFixture::new()?,
        })
    }

    pub fn fixture(&self) -> &TestFixture {
        &self.fixture
    }

    /// Run rowdiff with the given arguments and return what it wrote
    pub fn run_command(&self, args: &[&str]) -> Result<String> {
        use clap::Parser;
        use rowdiff::cli::Cli;
        use rowdiff::commands::execute_command;

        let out_path = self.fixture.root().join("output.txt");
        let out_arg = out_path.to_string_lossy().into_owned();

        let mut cmd_args = vec!["rowdiff"];
        cmd_args.extend(args);
        cmd_args.extend(["--out", out_arg.as_str()]);

        let cli = Cli::try_parse_from(cmd_args)
            .map_err(|e| rowdiff::RowdiffError::invalid_config(e.to_string()))?;
        execute_command(&cli)?;
        Ok(fs::read_to_string(&out_path)?)
    }

    /// Run a command and expect it to succeed
    pub fn expect_success(&self, args: &[&str]) -> String {
        self.run_command(args).expect("Command should succeed")
    }

    /// Run a command and expect it to fail
    pub fn expect_failure(&self, args: &[&str]) -> rowdiff::RowdiffError {
        self.run_command(args).expect_err("Command should fail")
    }
}

/// Sample data generators for testing
pub mod sample_data {
    pub fn simple_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "name", "price"],
            vec!["1", "Apple", "1.50"],
            vec!["2", "Banana", "0.75"],
            vec!["3", "Cherry", "2.00"],
        ]
    }

    pub fn updated_csv_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["id", "name", "price"],
            vec!["1", "Apple", "1.60"], // Price changed
            vec!["2", "Banana", "0.75"],
            vec!["4", "Date", "3.00"], // New row, Cherry removed
        ]
    }

    pub fn reordered_header_data() -> Vec<Vec<&'static str>> {
        vec![
            vec!["price", "id", "name"],
            vec!["1.50", "1", "Apple"],
            vec!["0.75", "2", "Banana"],
            vec!["2.00", "3", "Cherry"],
        ]
    }
}

/// Assertion helpers for event streams
pub mod assertions {
    use rowdiff::{DiffEvent, DiffStats};

    /// Assert the stream is framed by exactly one schema and one stats event
    pub fn assert_well_framed(events: &[DiffEvent]) {
        assert!(events.len() >= 2, "Stream should hold schema and stats");
        assert_eq!(events[0].kind(), "schema", "First event should be schema");
        assert_eq!(
            events[events.len() - 1].kind(),
            "stats",
            "Last event should be stats"
        );
        let schemas = events.iter().filter(|e| e.kind() == "schema").count();
        let stats = events.iter().filter(|e| e.kind() == "stats").count();
        assert_eq!(schemas, 1, "Exactly one schema event expected");
        assert_eq!(stats, 1, "Exactly one stats event expected");
    }

    /// Stats carried by the final event
    pub fn stats_of(events: &[DiffEvent]) -> DiffStats {
        *rowdiff::event::final_stats(events).expect("Stream should end with stats")
    }

    /// Assert the compared counter matches changed plus unchanged
    pub fn assert_counters_consistent(events: &[DiffEvent]) {
        let stats = stats_of(events);
        assert_eq!(
            stats.rows_total_compared,
            stats.rows_changed + stats.rows_unchanged,
            "rows_total_compared should equal changed + unchanged"
        );
    }
}

/// Event type names in stream order
pub fn kinds(events: &[DiffEvent]) -> Vec<&'static str> {
    events.iter().map(DiffEvent::kind).collect()
}

/// Events as JSON values, for comparisons against literal expectations
pub fn to_values(events: &[DiffEvent]) -> Vec<serde_json::Value> {
    events
        .iter()
        .map(|event| serde_json::to_value(event).expect("Event should serialize"))
        .collect()
}
