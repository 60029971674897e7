//! Output formatting utilities

use crate::error::Result;
use crate::event::{final_stats, DiffEvent, DiffStats};
use serde::Serialize;

/// Output layout selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One event per line
    Jsonl,
    /// All events in a single JSON array
    Json,
    /// Human-readable schema and stats report
    Summary,
}

impl OutputFormat {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(Self::Jsonl),
            "json" => Ok(Self::Json),
            "summary" => Ok(Self::Summary),
            _ => Err(format!(
                "Invalid output format: {}. Use 'jsonl', 'json' or 'summary'",
                s
            )),
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Encode one value, compact or pretty
    ///
    /// Compact output keeps field order. Pretty output goes through
    /// `serde_json::Value`, whose map orders keys by name.
    pub fn encode<T: Serialize + ?Sized>(data: &T, pretty: bool) -> Result<String> {
        if pretty {
            let value = serde_json::to_value(data)?;
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(data)?)
        }
    }

    /// Encode the whole event list as one array
    pub fn format_events(events: &[DiffEvent], pretty: bool) -> Result<String> {
        Self::encode(events, pretty)
    }
}

/// Plain-text report of a finished comparison
pub struct SummaryFormatter;

impl SummaryFormatter {
    pub fn render(events: &[DiffEvent]) -> String {
        let (columns_a, columns_b) = events
            .iter()
            .find_map(|event| match event {
                DiffEvent::Schema {
                    columns_a,
                    columns_b,
                } => Some((columns_a.as_slice(), columns_b.as_slice())),
                _ => None,
            })
            .unwrap_or_default();
        let stats = final_stats(events).copied().unwrap_or_default();

        let mut lines = vec![
            "rowdiff summary".to_string(),
            format!("├─ Columns A: {}", Self::column_list(columns_a)),
            format!("├─ Columns B: {}", Self::column_list(columns_b)),
        ];
        lines.extend(Self::stats_lines(&stats));
        lines.join("\n")
    }

    fn column_list(columns: &[String]) -> String {
        if columns.is_empty() {
            "<unknown>".to_string()
        } else {
            columns.join(", ")
        }
    }

    fn stats_lines(stats: &DiffStats) -> Vec<String> {
        let marker = if stats.has_differences() { "❌" } else { "✅" };
        vec![
            format!("├─ {} Rows compared: {}", marker, stats.rows_total_compared),
            format!("│  ├─ Changed: {}", stats.rows_changed),
            format!("│  └─ Unchanged: {}", stats.rows_unchanged),
            format!("├─ Added: {}", stats.rows_added),
            format!("└─ Removed: {}", stats.rows_removed),
        ]
    }
}
