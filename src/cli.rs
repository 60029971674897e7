//! Command-line interface for rowdiff

use crate::engine::DiffOptions;
use crate::header::HeaderMode;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowdiff")]
#[command(about = "Compare two CSV files and emit a JSON event stream")]
#[command(version)]
pub struct Cli {
    /// Path to CSV A
    #[arg(long = "a", value_name = "PATH")]
    pub a: PathBuf,

    /// Path to CSV B
    #[arg(long = "b", value_name = "PATH")]
    pub b: PathBuf,

    /// Key column (repeat for composite keys; enables keyed mode)
    #[arg(long = "key", value_name = "COLUMN")]
    pub key: Vec<String>,

    /// Comma-separated key columns (enables keyed mode)
    #[arg(long, value_name = "LIST")]
    pub compare_by_keys: Option<String>,

    /// Header comparison: "strict" or "sorted"
    #[arg(long, default_value = "strict")]
    pub header_mode: String,

    /// Alias for --header-mode sorted
    #[arg(long)]
    pub ignore_column_order: bool,

    /// Emit events for rows that did not change
    #[arg(long)]
    pub emit_unchanged: bool,

    /// Output format: "jsonl", "json", or "summary"
    #[arg(long, default_value = "jsonl", value_parser = OutputFormat::parse)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Key columns from --key followed by --compare-by-keys
    pub fn key_columns(&self) -> Vec<String> {
        let mut columns = self.key.clone();
        if let Some(list) = &self.compare_by_keys {
            columns.extend(parse_key_list(list));
        }
        columns
    }

    /// Comparison options implied by the flags
    pub fn diff_options(&self) -> DiffOptions {
        let header_mode = if self.ignore_column_order {
            HeaderMode::Sorted.as_str()
        } else {
            self.header_mode.as_str()
        };

        let mut options = DiffOptions::from_key_columns(self.key_columns())
            .with_emit_unchanged(self.emit_unchanged);
        options.header_mode = header_mode.to_string();
        options
    }
}

/// Split a comma-separated key list, dropping blank entries
pub fn parse_key_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
