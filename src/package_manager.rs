//! External package-manager integration
//!
//! Family packages the feed path cannot resolve are handed to the project's
//! package-manager CLI: its "list outdated" report is parsed for family
//! entries and each one is pinned with an "add package" invocation. The tool
//! is invoked through an injected runner so tests can substitute a stub.
//!
//! A failing or unparseable tool invocation means "no update for this
//! package" and never aborts the run.

use crate::domain::{DelegatedUpdate, NAMESPACE_PREFIX};
use std::path::Path;
use std::process::Command;

/// Captured outcome of one external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code (-1 when unavailable)
    pub exit_code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true for a zero exit code
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait for running external commands
pub trait CommandRunner {
    /// Run a program with arguments in a working directory, capturing output
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> std::io::Result<CommandOutput>;
}

/// Runner that executes real system commands
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    /// Creates a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str], dir: &Path) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).current_dir(dir).output()?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One outdated family package reported by the external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedPackage {
    /// Package name
    pub name: String,
    /// Latest version the tool reports
    pub latest: String,
}

/// Wrapper around the configured package-manager CLI
pub struct PackageTool {
    program: String,
}

impl PackageTool {
    /// Creates a wrapper for a tool program name
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The configured program name
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Lists outdated family packages via `<tool> list package --outdated`
    ///
    /// Non-zero exit or unparseable output yields an empty list.
    pub fn list_outdated(&self, runner: &dyn CommandRunner, dir: &Path) -> Vec<OutdatedPackage> {
        let output = match runner.run(&self.program, &["list", "package", "--outdated"], dir) {
            Ok(output) if output.success() => output,
            _ => return Vec::new(),
        };

        parse_outdated_report(&output.stdout)
    }

    /// Pins a package at a version via `<tool> add package`
    pub fn pin(
        &self,
        runner: &dyn CommandRunner,
        dir: &Path,
        package: &str,
        version: &str,
    ) -> bool {
        runner
            .run(
                &self.program,
                &["add", "package", package, "--version", version],
                dir,
            )
            .map(|output| output.success())
            .unwrap_or(false)
    }
}

/// Parses the tool's outdated-package table
///
/// Family rows look like `> Name  requested  resolved  latest`; the second
/// column is the package id and the last column the latest version. Rows that
/// do not fit the shape are ignored.
pub fn parse_outdated_report(report: &str) -> Vec<OutdatedPackage> {
    let mut packages = Vec::new();

    for line in report.lines() {
        if !line.contains(NAMESPACE_PREFIX) || !line.contains('>') {
            continue;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            continue;
        }

        packages.push(OutdatedPackage {
            name: parts[1].to_string(),
            latest: parts[parts.len() - 1].to_string(),
        });
    }

    packages
}

/// Delegates unresolved family packages to the external tool
///
/// Only packages named in `unresolved` are touched; each one found outdated
/// is pinned at the reported latest version. Every attempt is recorded, pin
/// failures included.
pub fn delegate_updates(
    tool: &PackageTool,
    runner: &dyn CommandRunner,
    dir: &Path,
    unresolved: &[String],
) -> Vec<DelegatedUpdate> {
    let outdated = tool.list_outdated(runner, dir);
    let mut results = Vec::new();

    for package in &outdated {
        if !unresolved.iter().any(|name| name == &package.name) {
            continue;
        }

        let succeeded = tool.pin(runner, dir, &package.name, &package.latest);
        results.push(DelegatedUpdate {
            package: package.name.clone(),
            version: package.latest.clone(),
            succeeded,
        });
    }

    results
}
