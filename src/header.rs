//! Header reconciliation between the two inputs

use crate::error::{Result, RowdiffError};
use std::str::FromStr;

/// How the two headers must relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Same names in the same order
    #[default]
    Strict,
    /// Same names, any order
    Sorted,
}

impl HeaderMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(Self::Strict),
            "sorted" => Ok(Self::Sorted),
            other => Err(RowdiffError::invalid_header_mode(format!(
                "Unsupported header_mode: {}. Use 'strict' or 'sorted'",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Sorted => "sorted",
        }
    }
}

impl FromStr for HeaderMode {
    type Err = RowdiffError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Columns whose values are compared, in reporting order
///
/// Fails with `invalid_header_mode` when `mode` names neither known mode.
pub fn comparison_columns(
    header_a: &[String],
    header_b: &[String],
    mode: &str,
) -> Result<Vec<String>> {
    match HeaderMode::parse(mode)? {
        HeaderMode::Strict => {
            if header_a != header_b {
                return Err(RowdiffError::header_mismatch(format!(
                    "Header mismatch: A={:?} B={:?}",
                    header_a, header_b
                )));
            }
            Ok(header_a.to_vec())
        }
        HeaderMode::Sorted => {
            let mut sorted_a = header_a.to_vec();
            let mut sorted_b = header_b.to_vec();
            sorted_a.sort();
            sorted_b.sort();
            if sorted_a != sorted_b {
                return Err(RowdiffError::header_mismatch(format!(
                    "Header mismatch (sorted mode): A={:?} B={:?}",
                    header_a, header_b
                )));
            }
            Ok(sorted_a)
        }
    }
}
