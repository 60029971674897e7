//! Main entry point for rowdiff CLI

use clap::Parser;
use rowdiff::cli::Cli;
use rowdiff::commands::execute_command;
use rowdiff::ERROR_EXIT_CODE;

fn main() {
    let cli = Cli::parse();

    // stdout carries the event stream, so stderr stays quiet unless asked
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = execute_command(&cli) {
        eprintln!("{}", e.to_error_event());
        std::process::exit(ERROR_EXIT_CODE);
    }
}
