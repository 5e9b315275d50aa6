//! CLI argument parsing module for otelup

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// OpenTelemetry distribution dependency reconciler
#[derive(Parser, Debug, Clone)]
#[command(
    name = "otelup",
    version,
    about = "OpenTelemetry distribution dependency reconciler"
)]
pub struct CliArgs {
    /// Distribution root directory (default: current directory)
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// CI output file (overrides GITHUB_OUTPUT)
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Files and tools of the target distribution
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Manifest file, relative to the distribution root
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Build descriptor file to keep in sync, relative to the distribution root
    #[arg(long)]
    pub descriptor: Option<PathBuf>,

    /// External package-manager command for delegated updates
    #[arg(long)]
    pub package_tool: Option<String>,

    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve the latest stable upstream versions and publish them
    Resolve {
        /// Core release feed, as <owner>/<repo>
        #[arg(long)]
        core_repo: String,

        /// Instrumentation release feed, as <owner>/<repo>
        #[arg(long)]
        instrumentation_repo: Option<String>,
    },

    /// Apply resolved versions to the manifest and build descriptor
    Update {
        /// Target core version (overrides OTEL_CORE_VERSION)
        #[arg(long)]
        core_version: Option<String>,

        /// Target instrumentation tag (overrides OTEL_INSTRUMENTATION_VERSION)
        #[arg(long)]
        instrumentation_version: Option<String>,

        /// Contrib release feed for individual package resolution
        #[arg(long)]
        contrib_repo: Option<String>,

        /// Resolve leftover packages through the flat package index
        #[arg(long)]
        use_index: bool,

        /// Flat package-index base URL (implies --use-index)
        #[arg(long)]
        index_url: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Report upstream releases with breaking changes between the declared
    /// and target core versions
    Breaking {
        /// Core release feed, as <owner>/<repo>
        #[arg(long)]
        core_repo: String,

        /// Target core version (overrides OTEL_CORE_VERSION)
        #[arg(long)]
        core_version: Option<String>,

        /// Manifest file, relative to the distribution root
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Run the full reconciliation pipeline: resolve, scan, update
    Run {
        /// Core release feed, as <owner>/<repo>
        #[arg(long)]
        core_repo: String,

        /// Instrumentation release feed, as <owner>/<repo>
        #[arg(long)]
        instrumentation_repo: Option<String>,

        /// Contrib release feed for individual package resolution
        #[arg(long)]
        contrib_repo: Option<String>,

        /// Resolve leftover packages through the flat package index
        #[arg(long)]
        use_index: bool,

        /// Flat package-index base URL (implies --use-index)
        #[arg(long)]
        index_url: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let args = CliArgs::parse_from([
            "otelup",
            "resolve",
            "--core-repo",
            "open-telemetry/core",
            "--instrumentation-repo",
            "open-telemetry/instrumentation",
        ]);

        match args.command {
            Command::Resolve {
                core_repo,
                instrumentation_repo,
            } => {
                assert_eq!(core_repo, "open-telemetry/core");
                assert_eq!(
                    instrumentation_repo.as_deref(),
                    Some("open-telemetry/instrumentation")
                );
            }
            _ => panic!("expected resolve command"),
        }
    }

    #[test]
    fn test_parse_update_with_target() {
        let args = CliArgs::parse_from([
            "otelup",
            "--path",
            "/dist",
            "update",
            "--core-version",
            "1.9.0",
            "--manifest",
            "packages.toml",
            "-n",
        ]);

        assert_eq!(args.path, PathBuf::from("/dist"));
        match args.command {
            Command::Update {
                core_version,
                target,
                ..
            } => {
                assert_eq!(core_version.as_deref(), Some("1.9.0"));
                assert_eq!(target.manifest, Some(PathBuf::from("packages.toml")));
                assert!(target.dry_run);
            }
            _ => panic!("expected update command"),
        }
    }

    #[test]
    fn test_parse_breaking() {
        let args = CliArgs::parse_from([
            "otelup",
            "breaking",
            "--core-repo",
            "open-telemetry/core",
            "--core-version",
            "1.9.0",
        ]);

        match args.command {
            Command::Breaking {
                core_repo,
                core_version,
                manifest,
            } => {
                assert_eq!(core_repo, "open-telemetry/core");
                assert_eq!(core_version.as_deref(), Some("1.9.0"));
                assert!(manifest.is_none());
            }
            _ => panic!("expected breaking command"),
        }
    }

    #[test]
    fn test_parse_run_defaults() {
        let args = CliArgs::parse_from(["otelup", "run", "--core-repo", "open-telemetry/core"]);

        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        match args.command {
            Command::Run {
                core_repo,
                use_index,
                target,
                ..
            } => {
                assert_eq!(core_repo, "open-telemetry/core");
                assert!(!use_index);
                assert!(!target.dry_run);
                assert!(target.package_tool.is_none());
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_resolve_requires_core_repo() {
        let result = CliArgs::try_parse_from(["otelup", "resolve"]);
        assert!(result.is_err());
    }
}
