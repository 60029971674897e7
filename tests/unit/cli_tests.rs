//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use rowdiff::cli::Cli;
use rowdiff::output::OutputFormat;
use rowdiff::{compare_bytes, CompareMode, HeaderMode};
use std::path::PathBuf;

#[test]
fn test_cli_minimal_arguments() {
    let cli = Cli::try_parse_from(["rowdiff", "--a", "a.csv", "--b", "b.csv"]).unwrap();
    assert_eq!(cli.a, PathBuf::from("a.csv"));
    assert_eq!(cli.b, PathBuf::from("b.csv"));
    assert!(cli.key.is_empty());
    assert!(cli.compare_by_keys.is_none());
    assert_eq!(cli.header_mode, "strict");
    assert_eq!(cli.format, OutputFormat::Jsonl);
    assert!(!cli.emit_unchanged);
    assert!(!cli.pretty);
    assert!(cli.out.is_none());
}

#[test]
fn test_cli_requires_both_inputs() {
    assert!(Cli::try_parse_from(["rowdiff", "--a", "a.csv"]).is_err());
    assert!(Cli::try_parse_from(["rowdiff", "--b", "b.csv"]).is_err());
}

#[test]
fn test_cli_no_keys_selects_positional_mode() {
    let cli = Cli::try_parse_from(["rowdiff", "--a", "a.csv", "--b", "b.csv"]).unwrap();
    let options = cli.diff_options();
    assert_eq!(options.compare_mode().unwrap(), CompareMode::Positional);
    assert!(options.key_columns.is_empty());
}

#[test]
fn test_cli_repeated_keys_select_keyed_mode() {
    let cli = Cli::try_parse_from([
        "rowdiff", "--a", "a.csv", "--b", "b.csv", "--key", "region", "--key", "id",
    ])
    .unwrap();
    let options = cli.diff_options();
    assert_eq!(options.compare_mode().unwrap(), CompareMode::Keyed);
    assert_eq!(options.key_columns, vec!["region", "id"]);
}

#[test]
fn test_cli_compare_by_keys_list() {
    let cli = Cli::try_parse_from([
        "rowdiff",
        "--a",
        "a.csv",
        "--b",
        "b.csv",
        "--compare-by-keys",
        "region, id",
    ])
    .unwrap();
    let options = cli.diff_options();
    assert_eq!(options.compare_mode().unwrap(), CompareMode::Keyed);
    assert_eq!(options.key_columns, vec!["region", "id"]);
}

#[test]
fn test_cli_header_mode_and_flags() {
    let cli = Cli::try_parse_from([
        "rowdiff",
        "--a",
        "a.csv",
        "--b",
        "b.csv",
        "--header-mode",
        "sorted",
        "--emit-unchanged",
        "--pretty",
        "--format",
        "summary",
        "--out",
        "report.txt",
        "-v",
    ])
    .unwrap();
    let options = cli.diff_options();
    assert_eq!(options.resolve_header_mode().unwrap(), HeaderMode::Sorted);
    assert!(options.emit_unchanged);
    assert!(cli.pretty);
    assert!(cli.verbose);
    assert_eq!(cli.format, OutputFormat::Summary);
    assert_eq!(cli.out, Some(PathBuf::from("report.txt")));
}

#[test]
fn test_cli_invalid_header_mode_reported_as_error_code() {
    let cli = Cli::try_parse_from([
        "rowdiff",
        "--a",
        "a.csv",
        "--b",
        "b.csv",
        "--header-mode",
        "loose",
    ])
    .unwrap();
    let options = cli.diff_options();
    assert_eq!(options.header_mode, "loose");

    let err = compare_bytes(b"id\n1\n", b"id\n1\n", &options).unwrap_err();
    assert_eq!(err.code(), "invalid_header_mode");
}

#[test]
fn test_cli_invalid_format_rejected_by_parser() {
    let result = Cli::try_parse_from([
        "rowdiff", "--a", "a.csv", "--b", "b.csv", "--format", "xml",
    ]);
    assert!(result.is_err());
}
