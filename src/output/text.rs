//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Update lines with semantic change magnitude (major/minor/patch)
//! - Delegated and descriptor outcomes
//! - Final summary line stating whether any update occurred

use crate::domain::{CanonicalVersion, ReconcileSummary};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two version strings
    pub fn from_versions(old: &str, new: &str) -> Self {
        let old = old.strip_prefix('v').unwrap_or(old);
        let new = new.strip_prefix('v').unwrap_or(new);

        match (CanonicalVersion::parse(old), CanonicalVersion::parse(new)) {
            (Some(old), Some(new)) => {
                if new.major() != old.major() {
                    VersionChangeType::Major
                } else if new.minor() != old.minor() {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn dry_run_prefix(summary: &ReconcileSummary) -> &'static str {
        if summary.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &ReconcileSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = Self::dry_run_prefix(summary);

        for update in &summary.updates {
            let change = VersionChangeType::from_versions(&update.old_version, &update.new_version);
            writeln!(
                writer,
                "{}Updated {}: {} → {} [{}]",
                prefix,
                update.package,
                update.old_version,
                update.new_version,
                change.colored_label()
            )?;
        }

        if self.verbosity == Verbosity::Verbose {
            for package in &summary.up_to_date {
                writeln!(writer, "{} already at latest version", package)?;
            }
        }

        for delegated in &summary.delegated {
            if delegated.succeeded {
                writeln!(
                    writer,
                    "{}Updated {} to {} via package manager",
                    prefix, delegated.package, delegated.version
                )?;
            } else {
                writeln!(
                    writer,
                    "Failed to update {} via package manager",
                    delegated.package
                )?;
            }
        }

        if let Some(descriptor) = &summary.descriptor {
            if descriptor.updated {
                writeln!(
                    writer,
                    "{}Updated default instrumentation version to {}",
                    prefix, descriptor.version
                )?;
            } else if self.verbosity == Verbosity::Verbose {
                writeln!(
                    writer,
                    "Default instrumentation version already at {}",
                    descriptor.version
                )?;
            }
        }

        if self.verbosity != Verbosity::Quiet {
            for error in &summary.errors {
                writeln!(writer, "{} {}", "warning:".yellow(), error)?;
            }
        }

        // Final summary line
        if summary.has_changes() {
            match &summary.core_version {
                Some(core) => writeln!(
                    writer,
                    "{}Dependencies updated to Core {}",
                    prefix,
                    core.bold()
                )?,
                None => writeln!(writer, "{}Dependencies updated", prefix)?,
            }
        } else {
            writeln!(writer, "No updates were made")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppliedUpdate, DelegatedUpdate, DescriptorOutcome};
    use std::path::PathBuf;

    fn render(summary: &ReconcileSummary, verbosity: Verbosity) -> String {
        colored::control::set_override(false);
        let formatter = TextFormatter::new(verbosity);
        let mut buffer = Vec::new();
        formatter.format(summary, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn summary_with_update() -> ReconcileSummary {
        let mut summary = ReconcileSummary::new("packages.toml", false);
        summary.core_version = Some("1.9.0".to_string());
        summary.updates.push(AppliedUpdate {
            package: "OpenTelemetry".to_string(),
            old_version: "1.8.0".to_string(),
            new_version: "1.9.0".to_string(),
        });
        summary
    }

    #[test]
    fn test_change_type_classification() {
        assert_eq!(
            VersionChangeType::from_versions("1.8.0", "2.0.0"),
            VersionChangeType::Major
        );
        assert_eq!(
            VersionChangeType::from_versions("1.8.0", "1.9.0"),
            VersionChangeType::Minor
        );
        assert_eq!(
            VersionChangeType::from_versions("1.8.0", "1.8.1"),
            VersionChangeType::Patch
        );
        assert_eq!(
            VersionChangeType::from_versions("v1.8.0", "v1.9.0"),
            VersionChangeType::Minor
        );
        assert_eq!(
            VersionChangeType::from_versions("unknown", "1.9.0"),
            VersionChangeType::Unknown
        );
    }

    #[test]
    fn test_change_type_labels() {
        assert_eq!(VersionChangeType::Major.label(), "major");
        assert_eq!(VersionChangeType::Minor.label(), "minor");
        assert_eq!(VersionChangeType::Patch.label(), "patch");
        assert_eq!(VersionChangeType::Unknown.label(), "?");
    }

    #[test]
    fn test_format_update_lines() {
        let output = render(&summary_with_update(), Verbosity::Normal);
        assert!(output.contains("Updated OpenTelemetry: 1.8.0 → 1.9.0 [minor]"));
        assert!(output.contains("Dependencies updated to Core 1.9.0"));
    }

    #[test]
    fn test_format_no_updates() {
        let summary = ReconcileSummary::new("packages.toml", false);
        let output = render(&summary, Verbosity::Normal);
        assert!(output.contains("No updates were made"));
    }

    #[test]
    fn test_format_dry_run_prefix() {
        let mut summary = summary_with_update();
        summary.dry_run = true;
        let output = render(&summary, Verbosity::Normal);
        assert!(output.contains("(dry-run) Updated OpenTelemetry"));
    }

    #[test]
    fn test_format_up_to_date_verbose_only() {
        let mut summary = ReconcileSummary::new("packages.toml", false);
        summary.up_to_date.push("OpenTelemetry.Api".to_string());

        let normal = render(&summary, Verbosity::Normal);
        assert!(!normal.contains("already at latest"));

        let verbose = render(&summary, Verbosity::Verbose);
        assert!(verbose.contains("OpenTelemetry.Api already at latest version"));
    }

    #[test]
    fn test_format_delegated_outcomes() {
        let mut summary = summary_with_update();
        summary.delegated.push(DelegatedUpdate {
            package: "OpenTelemetry.Instrumentation.Http".to_string(),
            version: "1.12.0".to_string(),
            succeeded: true,
        });
        summary.delegated.push(DelegatedUpdate {
            package: "OpenTelemetry.Instrumentation.Runtime".to_string(),
            version: "1.11.0".to_string(),
            succeeded: false,
        });

        let output = render(&summary, Verbosity::Normal);
        assert!(output.contains("Updated OpenTelemetry.Instrumentation.Http to 1.12.0"));
        assert!(output.contains("Failed to update OpenTelemetry.Instrumentation.Runtime"));
    }

    #[test]
    fn test_format_descriptor_outcome() {
        let mut summary = summary_with_update();
        summary.descriptor = Some(DescriptorOutcome {
            path: PathBuf::from("src/defaults.rs"),
            updated: true,
            version: "v1.7.0".to_string(),
        });

        let output = render(&summary, Verbosity::Normal);
        assert!(output.contains("Updated default instrumentation version to v1.7.0"));
    }

    #[test]
    fn test_format_errors_as_warnings() {
        let mut summary = ReconcileSummary::new("packages.toml", false);
        summary.errors.push("contrib lookup failed".to_string());

        let output = render(&summary, Verbosity::Normal);
        assert!(output.contains("warning: contrib lookup failed"));

        let quiet = render(&summary, Verbosity::Quiet);
        assert!(!quiet.contains("warning:"));
    }
}
