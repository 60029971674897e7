//! Command implementation for the rowdiff CLI

use crate::cli::Cli;
use crate::engine::compare;
use crate::error::Result;
use crate::event::{final_stats, DiffEvent};
use crate::output::{JsonFormatter, OutputFormat, SummaryFormatter};
use crate::sink::{emit_all, JsonlSink};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Run a comparison as described by the parsed command line
pub fn execute_command(cli: &Cli) -> Result<()> {
    let options = cli.diff_options();
    let events = compare(&cli.a, &cli.b, &options)?;

    if let Some(stats) = final_stats(&events) {
        info!(
            "Compared {} with {}: {} added, {} removed, {} changed, {} unchanged",
            cli.a.display(),
            cli.b.display(),
            stats.rows_added,
            stats.rows_removed,
            stats.rows_changed,
            stats.rows_unchanged
        );
    }

    let writer = open_output(cli.out.as_deref())?;
    write_events(&events, cli.format, cli.pretty, writer)
}

/// Render a finished event list in the requested format
pub fn write_events<W: Write>(
    events: &[DiffEvent],
    format: OutputFormat,
    pretty: bool,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Jsonl => {
            let mut sink = JsonlSink::new(writer, pretty);
            emit_all(events, &mut sink)
        }
        OutputFormat::Json => {
            writeln!(writer, "{}", JsonFormatter::format_events(events, pretty)?)?;
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Summary => {
            writeln!(writer, "{}", SummaryFormatter::render(events))?;
            writer.flush()?;
            Ok(())
        }
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
