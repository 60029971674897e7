//! Event stream produced by a comparison

use crate::loader::RowValues;
use indexmap::IndexMap;
use serde::Serialize;

/// Identifies a row in a row-level event
///
/// Keyed comparisons report the key as a column to value object, positional
/// comparisons report the CSV record number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowLocator {
    Key(IndexMap<String, String>),
    RowIndex(usize),
}

/// Before and after value of one changed cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellDelta {
    pub from: String,
    pub to: String,
}

/// Running counters, emitted once at the end of the stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub rows_total_compared: u64,
    pub rows_added: u64,
    pub rows_removed: u64,
    pub rows_changed: u64,
    pub rows_unchanged: u64,
}

impl DiffStats {
    pub fn record_added(&mut self) {
        self.rows_added += 1;
    }

    pub fn record_removed(&mut self) {
        self.rows_removed += 1;
    }

    pub fn record_changed(&mut self) {
        self.rows_total_compared += 1;
        self.rows_changed += 1;
    }

    pub fn record_unchanged(&mut self) {
        self.rows_total_compared += 1;
        self.rows_unchanged += 1;
    }

    pub fn has_differences(&self) -> bool {
        self.rows_added + self.rows_removed + self.rows_changed > 0
    }
}

/// One record of the output stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiffEvent {
    Schema {
        columns_a: Vec<String>,
        columns_b: Vec<String>,
    },
    Added {
        #[serde(flatten)]
        locator: RowLocator,
        row: RowValues,
    },
    Removed {
        #[serde(flatten)]
        locator: RowLocator,
        row: RowValues,
    },
    Changed {
        #[serde(flatten)]
        locator: RowLocator,
        changed: Vec<String>,
        before: RowValues,
        after: RowValues,
        delta: IndexMap<String, CellDelta>,
    },
    Unchanged {
        #[serde(flatten)]
        locator: RowLocator,
        row: RowValues,
    },
    Stats(DiffStats),
}

impl DiffEvent {
    /// Wire name of the event type
    pub fn kind(&self) -> &'static str {
        match self {
            DiffEvent::Schema { .. } => "schema",
            DiffEvent::Added { .. } => "added",
            DiffEvent::Removed { .. } => "removed",
            DiffEvent::Changed { .. } => "changed",
            DiffEvent::Unchanged { .. } => "unchanged",
            DiffEvent::Stats(_) => "stats",
        }
    }

    pub fn locator(&self) -> Option<&RowLocator> {
        match self {
            DiffEvent::Added { locator, .. }
            | DiffEvent::Removed { locator, .. }
            | DiffEvent::Changed { locator, .. }
            | DiffEvent::Unchanged { locator, .. } => Some(locator),
            DiffEvent::Schema { .. } | DiffEvent::Stats(_) => None,
        }
    }

    pub fn stats(&self) -> Option<&DiffStats> {
        match self {
            DiffEvent::Stats(stats) => Some(stats),
            _ => None,
        }
    }
}

/// Final stats of a completed event list
pub fn final_stats(events: &[DiffEvent]) -> Option<&DiffStats> {
    events.last().and_then(DiffEvent::stats)
}
