//! otelup - OpenTelemetry distribution dependency reconciler CLI tool
//!
//! Subcommands:
//! - resolve: fetch the latest stable upstream versions
//! - update: apply resolved versions to the manifest and build descriptor
//! - breaking: report releases with breaking changes in the update range
//! - run: the full pipeline

use clap::Parser;
use otelup::cli::CliArgs;
use otelup::config::{CORE_VERSION_ENV, INSTRUMENTATION_VERSION_ENV};
use otelup::domain::{BreakingChangeReport, NO_BREAKING_CHANGES};
use otelup::orchestrator::{Orchestrator, ResolveOutcome, RunResult};
use otelup::output::{create_formatter, Verbosity};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("otelup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
    }

    let verbosity = Verbosity::from_cli(args.verbose, args.quiet);
    let json = args.json;

    let orchestrator = Orchestrator::new(args)?;
    let result = orchestrator.run().await?;

    let mut stdout = io::stdout().lock();

    match result {
        RunResult::Resolved(outcome) => {
            print_resolved(&outcome, &mut stdout)?;
        }
        RunResult::Updated(summary) => {
            create_formatter(json, verbosity).format(&summary, &mut stdout)?;
        }
        RunResult::Breaking(report) => {
            print_breaking(&report, &mut stdout)?;
        }
        RunResult::Full {
            resolved,
            report,
            summary,
        } => {
            print_resolved(&resolved, &mut stdout)?;
            if let Some(report) = report {
                print_breaking(&report, &mut stdout)?;
            }
            create_formatter(json, verbosity).format(&summary, &mut stdout)?;
        }
    }

    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Prints resolved versions as KEY=value lines
fn print_resolved(outcome: &ResolveOutcome, writer: &mut dyn Write) -> io::Result<()> {
    writeln!(writer, "{}={}", CORE_VERSION_ENV, outcome.core_version)?;
    if let Some(tag) = &outcome.instrumentation_version {
        writeln!(writer, "{}={}", INSTRUMENTATION_VERSION_ENV, tag)?;
    }
    Ok(())
}

/// Prints the breaking-change report
fn print_breaking(report: &BreakingChangeReport, writer: &mut dyn Write) -> io::Result<()> {
    writeln!(writer, "Checking for breaking changes:")?;
    writeln!(
        writer,
        "Core: {} → {}",
        report.old_version, report.new_version
    )?;

    if report.is_empty() {
        writeln!(writer, "{}", NO_BREAKING_CHANGES)?;
    } else {
        writeln!(writer, "Found releases with breaking changes:")?;
        for release in &report.releases {
            writeln!(writer, "  - {}", release)?;
        }
    }
    Ok(())
}
