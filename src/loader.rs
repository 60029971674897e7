//! CSV loading into in-memory tables

use crate::error::{Result, RowdiffError};
use csv::ReaderBuilder;
use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Which input a table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Column name to raw value, in header order
pub type RowValues = IndexMap<String, String>;

/// One data record of a CSV input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based record number; the header is record 1
    pub index: usize,
    pub values: RowValues,
}

impl Row {
    /// Value for a column of the row's header
    ///
    /// Callers pass reconciled or validated column names only.
    pub fn get(&self, column: &str) -> &str {
        debug_assert!(
            self.values.contains_key(column),
            "unknown column '{}' at CSV row {}",
            column,
            self.index
        );
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Header and rows of one fully loaded input
#[derive(Debug, Clone)]
pub struct Table {
    pub side: Side,
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Load a CSV file from disk
pub fn load_csv(path: &Path, side: Side) -> Result<Table> {
    let file = File::open(path).map_err(|e| {
        RowdiffError::csv_open(format!("Failed to open {} ({}): {}", side, path.display(), e))
    })?;
    let table = load_csv_reader(file, side, &path.display().to_string())?;
    debug!(
        "Loaded {} rows from {} ({})",
        table.row_count(),
        side,
        path.display()
    );
    Ok(table)
}

/// Load CSV content already held in memory
pub fn load_csv_bytes(bytes: &[u8], side: Side) -> Result<Table> {
    let label = format!("<memory:{}>", side);
    load_csv_reader(Cursor::new(bytes), side, &label)
}

/// Load CSV records from any reader
///
/// The first record is the header. Width checks are done here rather than by the
/// csv crate so the error can cite the side and record number.
pub fn load_csv_reader<R: Read>(reader: R, side: Side, source_label: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();
    let header_record = match records.next() {
        None => {
            return Err(RowdiffError::empty_file(format!(
                "{} file is empty: {}",
                side, source_label
            )))
        }
        Some(result) => result
            .map_err(|e| RowdiffError::csv_parse(format!("Failed to parse {}: {}", side, e)))?,
    };

    let mut header: Vec<String> = header_record.iter().map(str::to_string).collect();
    strip_byte_order_mark(&mut header);
    validate_header(&header, side)?;

    let width = header.len();
    let mut rows = Vec::new();
    for (position, result) in records.enumerate() {
        let index = position + 2;
        let record = result.map_err(|e| {
            RowdiffError::csv_parse(format!(
                "Failed to parse {} at CSV row {}: {}",
                side, index, e
            ))
        })?;

        if record.len() != width {
            return Err(RowdiffError::row_width_mismatch(format!(
                "Row width mismatch in {} at CSV row {}: expected {}, got {}",
                side,
                index,
                width,
                record.len()
            )));
        }

        let values: RowValues = header
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(Row { index, values });
    }

    Ok(Table { side, header, rows })
}

fn strip_byte_order_mark(header: &mut [String]) {
    if let Some(first) = header.first_mut() {
        if let Some(stripped) = first.strip_prefix(BYTE_ORDER_MARK) {
            *first = stripped.to_string();
        }
    }
}

fn validate_header(header: &[String], side: Side) -> Result<()> {
    let mut seen = HashSet::new();
    for name in header {
        if !seen.insert(name.as_str()) {
            return Err(RowdiffError::duplicate_column_name(format!(
                "Duplicate column name in {}: {}",
                side, name
            )));
        }
    }
    Ok(())
}
