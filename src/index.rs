//! Key-based row indexing for keyed comparisons

use crate::error::{Result, RowdiffError};
use crate::loader::{Row, Side, Table};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Key column values of one row, in key-column order
pub type KeyTuple = Vec<String>;

/// Rows of one side addressed by key
pub type RowIndex<'a> = HashMap<KeyTuple, &'a Row>;

/// Fail unless every key column is part of the table header
pub fn check_key_columns(table: &Table, key_columns: &[String]) -> Result<()> {
    if key_columns.is_empty() {
        return Err(RowdiffError::missing_key_column(
            "Keyed mode requires at least one key column",
        ));
    }

    for column in key_columns {
        if !table.header.contains(column) {
            return Err(RowdiffError::missing_key_column(format!(
                "Missing key column in {}: {}",
                table.side, column
            )));
        }
    }
    Ok(())
}

/// Extract the key tuple of a row
pub fn key_tuple(row: &Row, key_columns: &[String]) -> KeyTuple {
    key_columns
        .iter()
        .map(|column| row.get(column).to_string())
        .collect()
}

/// Pair key columns with key values for reporting
pub fn key_object(key_columns: &[String], key: &[String]) -> IndexMap<String, String> {
    key_columns
        .iter()
        .cloned()
        .zip(key.iter().cloned())
        .collect()
}

/// Index every row of a table by its key tuple
pub fn index_rows<'a>(table: &'a Table, key_columns: &[String]) -> Result<RowIndex<'a>> {
    let mut indexed: RowIndex<'a> = HashMap::with_capacity(table.rows.len());

    for row in &table.rows {
        if let Some(column) = key_columns.iter().find(|c| row.get(c).is_empty()) {
            return Err(RowdiffError::missing_key_value(format!(
                "Missing key value in {} at CSV row {} for key column '{}'",
                table.side, row.index, column
            )));
        }

        let key = key_tuple(row, key_columns);
        if let Some(prior) = indexed.get(&key) {
            return Err(duplicate_key(table.side, key_columns, &key, prior.index, row.index)?);
        }
        indexed.insert(key, row);
    }

    Ok(indexed)
}

fn duplicate_key(
    side: Side,
    key_columns: &[String],
    key: &[String],
    first: usize,
    second: usize,
) -> Result<RowdiffError> {
    let key_json = serde_json::to_string(&key_object(key_columns, key))?;
    Ok(RowdiffError::duplicate_key(format!(
        "Duplicate key in {}: {} (rows {} and {})",
        side, key_json, first, second
    )))
}
