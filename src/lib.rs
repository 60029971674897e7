//! # rowdiff
//!
//! Compares two CSV datasets and produces an ordered event stream describing
//! added, removed, changed and (optionally) unchanged rows, followed by summary
//! statistics. Rows are paired either by position or by key column values.

pub mod cli;
pub mod commands;
pub mod engine;
pub mod error;
pub mod event;
pub mod fixtures;
pub mod header;
pub mod index;
pub mod loader;
pub mod output;
pub mod sink;

pub use engine::{compare, compare_bytes, compare_tables, CompareMode, DiffOptions};
pub use error::{ErrorCode, Result, RowdiffError};
pub use event::{CellDelta, DiffEvent, DiffStats, RowLocator};
pub use header::HeaderMode;
pub use loader::{Row, Side, Table};

/// Exit code for a run that failed with an error event
pub const ERROR_EXIT_CODE: i32 = 2;
