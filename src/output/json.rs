//! JSON output formatter for machine processing

use crate::domain::ReconcileSummary;
use crate::output::OutputFormatter;
use std::io::Write;

/// JSON formatter emitting the full run summary
pub struct JsonFormatter {
    /// Whether to pretty-print
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &ReconcileSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, summary)
        } else {
            serde_json::to_writer(&mut *writer, summary)
        };
        result.map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
