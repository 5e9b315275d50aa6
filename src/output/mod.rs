//! Output formatting for reconciliation results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - CI output channel writer (append-only key/value file)

mod ci;
mod json;
mod text;

pub use ci::CiOutput;
pub use json::JsonFormatter;
pub use text::{TextFormatter, VersionChangeType};

use crate::domain::ReconcileSummary;
use std::io::Write;

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

impl Verbosity {
    /// Derive the verbosity from CLI flags
    pub fn from_cli(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the run summary
    fn format(&self, summary: &ReconcileSummary, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on CLI options
pub fn create_formatter(json: bool, verbosity: Verbosity) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter::new(true))
    } else {
        Box::new(TextFormatter::new(verbosity))
    }
}
