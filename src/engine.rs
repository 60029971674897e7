//! Comparison engine: matches rows of two tables and builds the event stream

use crate::error::{Result, RowdiffError};
use crate::event::{CellDelta, DiffEvent, DiffStats, RowLocator};
use crate::header::{comparison_columns, HeaderMode};
use crate::index::{check_key_columns, index_rows, key_object, KeyTuple};
use crate::loader::{load_csv, load_csv_bytes, Row, Side, Table};
use indexmap::IndexMap;
use log::debug;
use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

/// How rows of A are paired with rows of B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Row N of A against row N of B
    #[default]
    Positional,
    /// Rows matched by key column values
    Keyed,
}

impl CompareMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "positional" => Ok(Self::Positional),
            "keyed" => Ok(Self::Keyed),
            other => Err(RowdiffError::invalid_mode(format!(
                "Unsupported mode: {}. Use 'positional' or 'keyed'",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::Keyed => "keyed",
        }
    }
}

impl FromStr for CompareMode {
    type Err = RowdiffError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Options for one comparison run
///
/// Mode names are kept as given and resolved during the comparison, once both
/// inputs have loaded and the headers have been reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    pub key_columns: Vec<String>,
    pub mode: String,
    pub header_mode: String,
    pub emit_unchanged: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            key_columns: Vec::new(),
            mode: CompareMode::default().as_str().to_string(),
            header_mode: HeaderMode::default().as_str().to_string(),
            emit_unchanged: false,
        }
    }
}

impl DiffOptions {
    /// Build options from their textual form
    pub fn new(
        key_columns: Vec<String>,
        mode: impl Into<String>,
        header_mode: impl Into<String>,
        emit_unchanged: bool,
    ) -> Self {
        Self {
            key_columns,
            mode: mode.into(),
            header_mode: header_mode.into(),
            emit_unchanged,
        }
    }

    /// Keyed when any key column is given, positional otherwise
    pub fn from_key_columns(key_columns: Vec<String>) -> Self {
        let mode = if key_columns.is_empty() {
            CompareMode::Positional
        } else {
            CompareMode::Keyed
        };
        Self {
            key_columns,
            ..Self::default()
        }
        .with_mode(mode)
    }

    pub fn with_mode(mut self, mode: CompareMode) -> Self {
        self.mode = mode.as_str().to_string();
        self
    }

    pub fn with_header_mode(mut self, header_mode: HeaderMode) -> Self {
        self.header_mode = header_mode.as_str().to_string();
        self
    }

    pub fn with_emit_unchanged(mut self, emit_unchanged: bool) -> Self {
        self.emit_unchanged = emit_unchanged;
        self
    }

    pub fn compare_mode(&self) -> Result<CompareMode> {
        CompareMode::parse(&self.mode)
    }

    pub fn resolve_header_mode(&self) -> Result<HeaderMode> {
        HeaderMode::parse(&self.header_mode)
    }
}

/// Compare two CSV files
pub fn compare(path_a: &Path, path_b: &Path, options: &DiffOptions) -> Result<Vec<DiffEvent>> {
    let table_a = load_csv(path_a, Side::A)?;
    let table_b = load_csv(path_b, Side::B)?;
    compare_tables(&table_a, &table_b, options)
}

/// Compare two CSV documents held in memory
pub fn compare_bytes(a: &[u8], b: &[u8], options: &DiffOptions) -> Result<Vec<DiffEvent>> {
    let table_a = load_csv_bytes(a, Side::A)?;
    let table_b = load_csv_bytes(b, Side::B)?;
    compare_tables(&table_a, &table_b, options)
}

/// Compare two loaded tables
pub fn compare_tables(a: &Table, b: &Table, options: &DiffOptions) -> Result<Vec<DiffEvent>> {
    let columns = comparison_columns(&a.header, &b.header, &options.header_mode)?;
    let mode = options.compare_mode()?;
    debug!(
        "Comparing {} rows against {} rows ({} mode, {} header mode)",
        a.row_count(),
        b.row_count(),
        mode.as_str(),
        options.header_mode
    );

    let mut builder = EventBuilder::new(a, b, columns, options.emit_unchanged);
    match mode {
        CompareMode::Keyed => builder.keyed(&options.key_columns)?,
        CompareMode::Positional => builder.positional(),
    }
    Ok(builder.finish())
}

/// Outcome of comparing two rows present on both sides
enum RowComparison {
    Unchanged,
    Changed {
        changed: Vec<String>,
        delta: IndexMap<String, CellDelta>,
    },
}

fn compare_rows(row_a: &Row, row_b: &Row, columns: &[String]) -> RowComparison {
    let mut changed = Vec::new();
    let mut delta = IndexMap::new();

    for column in columns {
        let before = row_a.get(column);
        let after = row_b.get(column);
        if before != after {
            changed.push(column.clone());
            delta.insert(
                column.clone(),
                CellDelta {
                    from: before.to_string(),
                    to: after.to_string(),
                },
            );
        }
    }

    if changed.is_empty() {
        RowComparison::Unchanged
    } else {
        RowComparison::Changed { changed, delta }
    }
}

/// Accumulates events and counters for one comparison
struct EventBuilder<'a> {
    a: &'a Table,
    b: &'a Table,
    columns: Vec<String>,
    emit_unchanged: bool,
    events: Vec<DiffEvent>,
    stats: DiffStats,
}

impl<'a> EventBuilder<'a> {
    fn new(a: &'a Table, b: &'a Table, columns: Vec<String>, emit_unchanged: bool) -> Self {
        Self {
            a,
            b,
            columns,
            emit_unchanged,
            events: Vec::new(),
            stats: DiffStats::default(),
        }
    }

    fn keyed(&mut self, key_columns: &[String]) -> Result<()> {
        check_key_columns(self.a, key_columns)?;
        check_key_columns(self.b, key_columns)?;

        let (a, b) = (self.a, self.b);
        let index_a = index_rows(a, key_columns)?;
        let index_b = index_rows(b, key_columns)?;

        let all_keys: BTreeSet<&KeyTuple> = index_a.keys().chain(index_b.keys()).collect();
        debug!("Matching {} distinct keys", all_keys.len());

        for key in all_keys {
            let locator = || RowLocator::Key(key_object(key_columns, key));
            self.record(
                index_a.get(key).copied(),
                index_b.get(key).copied(),
                locator,
            );
        }
        Ok(())
    }

    fn positional(&mut self) {
        let (a, b) = (self.a, self.b);
        let total = a.rows.len().max(b.rows.len());

        for position in 0..total {
            let locator = || RowLocator::RowIndex(position + 2);
            self.record(a.rows.get(position), b.rows.get(position), locator);
        }
    }

    fn record(
        &mut self,
        row_a: Option<&Row>,
        row_b: Option<&Row>,
        locator: impl FnOnce() -> RowLocator,
    ) {
        match (row_a, row_b) {
            (None, Some(row_b)) => {
                self.stats.record_added();
                self.events.push(DiffEvent::Added {
                    locator: locator(),
                    row: row_b.values.clone(),
                });
            }
            (Some(row_a), None) => {
                self.stats.record_removed();
                self.events.push(DiffEvent::Removed {
                    locator: locator(),
                    row: row_a.values.clone(),
                });
            }
            (Some(row_a), Some(row_b)) => match compare_rows(row_a, row_b, &self.columns) {
                RowComparison::Unchanged => {
                    self.stats.record_unchanged();
                    if self.emit_unchanged {
                        self.events.push(DiffEvent::Unchanged {
                            locator: locator(),
                            row: row_a.values.clone(),
                        });
                    }
                }
                RowComparison::Changed { changed, delta } => {
                    self.stats.record_changed();
                    self.events.push(DiffEvent::Changed {
                        locator: locator(),
                        changed,
                        before: row_a.values.clone(),
                        after: row_b.values.clone(),
                        delta,
                    });
                }
            },
            (None, None) => {}
        }
    }

    /// Wrap row events with the schema and stats records
    fn finish(self) -> Vec<DiffEvent> {
        let mut events = Vec::with_capacity(self.events.len() + 2);
        events.push(DiffEvent::Schema {
            columns_a: self.a.header.clone(),
            columns_b: self.b.header.clone(),
        });
        events.extend(self.events);
        events.push(DiffEvent::Stats(self.stats));
        events
    }
}
