//! Error types for rowdiff operations

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RowdiffError>;

/// Machine-stable failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    EmptyFile,
    DuplicateColumnName,
    RowWidthMismatch,
    HeaderMismatch,
    InvalidHeaderMode,
    MissingKeyColumn,
    MissingKeyValue,
    DuplicateKey,
    InvalidMode,
    CsvOpenError,
    CsvParseError,
    InvalidConfig,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyFile => "empty_file",
            Self::DuplicateColumnName => "duplicate_column_name",
            Self::RowWidthMismatch => "row_width_mismatch",
            Self::HeaderMismatch => "header_mismatch",
            Self::InvalidHeaderMode => "invalid_header_mode",
            Self::MissingKeyColumn => "missing_key_column",
            Self::MissingKeyValue => "missing_key_value",
            Self::DuplicateKey => "duplicate_key",
            Self::InvalidMode => "invalid_mode",
            Self::CsvOpenError => "csv_open_error",
            Self::CsvParseError => "csv_parse_error",
            Self::InvalidConfig => "invalid_config",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum RowdiffError {
    #[error("{message}")]
    Diff { code: ErrorCode, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl RowdiffError {
    pub fn new(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self::Diff {
            code,
            message: msg.into(),
        }
    }

    pub fn empty_file(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmptyFile, msg)
    }

    pub fn duplicate_column_name(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateColumnName, msg)
    }

    pub fn row_width_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::RowWidthMismatch, msg)
    }

    pub fn header_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::HeaderMismatch, msg)
    }

    pub fn invalid_header_mode(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidHeaderMode, msg)
    }

    pub fn missing_key_column(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingKeyColumn, msg)
    }

    pub fn missing_key_value(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingKeyValue, msg)
    }

    pub fn duplicate_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateKey, msg)
    }

    pub fn invalid_mode(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMode, msg)
    }

    pub fn csv_open(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CsvOpenError, msg)
    }

    pub fn csv_parse(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::CsvParseError, msg)
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, msg)
    }

    /// Stable code reported to callers and written into error events
    pub fn code(&self) -> &'static str {
        match self {
            Self::Diff { code, .. } => code.as_str(),
            Self::Io(_) | Self::WalkDir(_) => "io_error",
            Self::Json(_) => "serialization_error",
        }
    }

    /// Human-readable message without the code
    pub fn message(&self) -> String {
        match self {
            Self::Diff { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// JSON object written to stderr when a run fails
    pub fn to_error_event(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "error",
            "code": self.code(),
            "message": self.message(),
        })
    }
}
