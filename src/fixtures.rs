//! Fixture-driven conformance cases
//!
//! A case directory holds `a.csv`, `b.csv`, `config.json` and exactly one of
//! `expected.jsonl` or `expected_error.json`.

use crate::engine::{compare, DiffOptions};
use crate::error::{Result, RowdiffError};
use log::debug;
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CONFIG_FILE: &str = "config.json";
pub const EXPECTED_EVENTS_FILE: &str = "expected.jsonl";
pub const EXPECTED_ERROR_FILE: &str = "expected_error.json";

/// Per-case comparison settings
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub key_columns: Vec<String>,
    #[serde(default = "default_header_mode")]
    pub header_mode: String,
    #[serde(default)]
    pub emit_unchanged: bool,
}

fn default_mode() -> String {
    "keyed".to_string()
}

fn default_header_mode() -> String {
    "strict".to_string()
}

impl FixtureConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            RowdiffError::invalid_config(format!("Invalid fixture config {}: {}", path.display(), e))
        })
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::new(
            self.key_columns.clone(),
            self.mode.as_str(),
            self.header_mode.as_str(),
            self.emit_unchanged,
        )
    }
}

/// Error a case is expected to fail with
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedError {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub message_contains: Option<String>,
}

impl ExpectedError {
    fn check(&self, err: &RowdiffError) -> std::result::Result<(), String> {
        if err.code() != self.code {
            return Err(format!(
                "error code mismatch: got {}, expected {}",
                err.code(),
                self.code
            ));
        }
        let message = err.message();
        if let Some(expected) = &self.message {
            if &message != expected {
                return Err(format!(
                    "error message mismatch: expected '{}', got '{}'",
                    expected, message
                ));
            }
        }
        if let Some(needle) = &self.message_contains {
            if !message.contains(needle.as_str()) {
                return Err(format!(
                    "error message mismatch: expected to contain '{}', got '{}'",
                    needle, message
                ));
            }
        }
        Ok(())
    }
}

/// What a case is expected to produce
#[derive(Debug, Clone)]
pub enum Expectation {
    Events(Vec<Value>),
    Error(ExpectedError),
}

impl Expectation {
    pub fn load(case_dir: &Path) -> Result<Self> {
        let events_path = case_dir.join(EXPECTED_EVENTS_FILE);
        let error_path = case_dir.join(EXPECTED_ERROR_FILE);

        match (events_path.exists(), error_path.exists()) {
            (true, false) => Ok(Self::Events(load_jsonl(&events_path)?)),
            (false, true) => {
                let content = fs::read_to_string(&error_path)?;
                let expected = serde_json::from_str(&content).map_err(|e| {
                    RowdiffError::invalid_config(format!(
                        "Invalid {}: {}",
                        error_path.display(),
                        e
                    ))
                })?;
                Ok(Self::Error(expected))
            }
            _ => Err(RowdiffError::invalid_config(format!(
                "Fixture {} must include exactly one of {} or {}",
                case_dir.display(),
                EXPECTED_EVENTS_FILE,
                EXPECTED_ERROR_FILE
            ))),
        }
    }
}

/// Parse a JSON-lines file, ignoring blank lines
pub fn load_jsonl(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                RowdiffError::invalid_config(format!("Invalid JSON line in {}: {}", path.display(), e))
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
}

/// Result of running one case
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub name: String,
    pub status: CaseStatus,
    pub detail: String,
}

impl CaseOutcome {
    fn new(case_dir: &Path, status: CaseStatus, detail: impl Into<String>) -> Self {
        let name = case_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<unknown>".to_string());
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status != CaseStatus::Failed
    }
}

/// Case directories directly below the fixtures root, sorted by name
pub fn discover_cases(root: &Path) -> Result<Vec<PathBuf>> {
    let mut cases = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            cases.push(entry.into_path());
        }
    }
    cases.sort();
    Ok(cases)
}

/// Run one case and compare the outcome with its expectation
pub fn run_case(case_dir: &Path) -> CaseOutcome {
    let config_path = case_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return CaseOutcome::new(case_dir, CaseStatus::Skipped, "no config.json");
    }

    let expectation = match Expectation::load(case_dir) {
        Ok(expectation) => expectation,
        Err(e) => return CaseOutcome::new(case_dir, CaseStatus::Failed, e.to_string()),
    };

    let actual = FixtureConfig::load(&config_path)
        .map(|config| config.diff_options())
        .and_then(|options| {
            compare(&case_dir.join("a.csv"), &case_dir.join("b.csv"), &options)
        })
        .and_then(|events| {
            events
                .iter()
                .map(|event| serde_json::to_value(event).map_err(RowdiffError::from))
                .collect::<Result<Vec<Value>>>()
        });

    let verdict = match (actual, &expectation) {
        (Ok(events), Expectation::Events(expected)) => {
            if &events == expected {
                Ok(())
            } else {
                Err(format!(
                    "output mismatch\nactual:   {}\nexpected: {}",
                    serde_json::to_string_pretty(&events).unwrap_or_default(),
                    serde_json::to_string_pretty(expected).unwrap_or_default()
                ))
            }
        }
        (Ok(_), Expectation::Error(expected)) => Err(format!(
            "expected error {} but case succeeded",
            expected.code
        )),
        (Err(err), Expectation::Error(expected)) => expected.check(&err),
        (Err(err), Expectation::Events(_)) => {
            Err(format!("unexpected error ({}): {}", err.code(), err.message()))
        }
    };

    match verdict {
        Ok(()) => CaseOutcome::new(case_dir, CaseStatus::Passed, "ok"),
        Err(detail) => CaseOutcome::new(case_dir, CaseStatus::Failed, detail),
    }
}

/// Run every case below a fixtures root, in parallel, reporting in name order
pub fn run_all(root: &Path) -> Result<Vec<CaseOutcome>> {
    let cases = discover_cases(root)?;
    debug!("Running {} fixture cases from {}", cases.len(), root.display());
    Ok(cases.par_iter().map(|case| run_case(case)).collect())
}
