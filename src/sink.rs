//! Destinations for a finished event stream

use crate::error::Result;
use crate::event::DiffEvent;
use crate::output::JsonFormatter;
use std::io::Write;

/// Receives events one at a time, in stream order
pub trait EventSink {
    fn on_event(&mut self, event: &DiffEvent) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON document per event
pub struct JsonlSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }
}

impl<W: Write> EventSink for JsonlSink<W> {
    fn on_event(&mut self, event: &DiffEvent) -> Result<()> {
        let line = JsonFormatter::encode(event, self.pretty)?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Feed a complete event list to a sink
pub fn emit_all<S: EventSink + ?Sized>(events: &[DiffEvent], sink: &mut S) -> Result<()> {
    for event in events {
        sink.on_event(event)?;
    }
    sink.finish()
}
