//! Reconciliation orchestrator
//!
//! Coordinates the stages behind each subcommand:
//! - resolve: fetch upstream feeds and publish the latest stable versions
//! - update: build the update plan and apply it to the manifest, descriptor,
//!   and package-manager paths
//! - breaking: scan the release range between declared and target core
//!   versions
//! - run: the full pipeline (resolve, then scan against the still-declared
//!   versions, then update)
//!
//! Only missing required input aborts a run. Transport failures degrade to
//! "not found" for the affected lookup and are recorded as warnings.

use crate::apply::ChangeApplier;
use crate::breaking;
use crate::cli::{CliArgs, Command, TargetArgs};
use crate::config::Config;
use crate::differ::{build_plan, unresolved_entries};
use crate::domain::{
    BreakingChangeReport, CanonicalVersion, DescriptorOutcome, ReconcileSummary, NAMESPACE_PREFIX,
};
use crate::feed::{GitHubFeed, HttpClient, NuGetIndex, VersionIndex};
use crate::manifest::{update_default_version, ManifestDocument, DEFAULT_MANIFEST_FILE};
use crate::output::CiOutput;
use crate::package_manager::{delegate_updates, PackageTool, SystemCommandRunner};
use crate::progress::Progress;
use crate::resolve::{
    resolve_contrib_versions, resolve_core_version, resolve_latest_tag, select_index_latest,
    VersionMap,
};
use anyhow::anyhow;
use std::path::{Path, PathBuf};

/// Versions resolved from the upstream feeds
#[derive(Debug, Clone)]
pub struct ResolveOutcome {
    /// Latest stable core version
    pub core_version: CanonicalVersion,
    /// Latest stable instrumentation release tag, verbatim
    pub instrumentation_version: Option<String>,
}

/// Result of one orchestrator run
#[derive(Debug)]
pub enum RunResult {
    /// `resolve` output
    Resolved(ResolveOutcome),
    /// `update` output
    Updated(ReconcileSummary),
    /// `breaking` output
    Breaking(BreakingChangeReport),
    /// `run` output
    Full {
        resolved: ResolveOutcome,
        report: Option<BreakingChangeReport>,
        summary: ReconcileSummary,
    },
}

/// Orchestrator owning the run configuration and HTTP client
pub struct Orchestrator {
    args: CliArgs,
    config: Config,
    client: HttpClient,
}

impl Orchestrator {
    /// Creates an orchestrator from parsed CLI arguments
    pub fn new(args: CliArgs) -> anyhow::Result<Self> {
        let config = Config::from_env()?.with_overrides(None, None, args.output.clone())?;
        let client = HttpClient::new()?;

        Ok(Self {
            args,
            config,
            client,
        })
    }

    /// Runs the configured subcommand
    pub async fn run(&self) -> anyhow::Result<RunResult> {
        match &self.args.command {
            Command::Resolve {
                core_repo,
                instrumentation_repo,
            } => {
                let outcome = self
                    .resolve_stage(core_repo, instrumentation_repo.as_deref())
                    .await?;
                Ok(RunResult::Resolved(outcome))
            }

            Command::Update {
                core_version,
                instrumentation_version,
                contrib_repo,
                use_index,
                index_url,
                target,
            } => {
                let config = self.config.clone().with_overrides(
                    core_version.as_deref(),
                    instrumentation_version.as_deref(),
                    None,
                )?;
                let summary = self
                    .update_stage(
                        &config,
                        contrib_repo.as_deref(),
                        *use_index || index_url.is_some(),
                        index_url.as_deref(),
                        target,
                    )
                    .await?;
                Ok(RunResult::Updated(summary))
            }

            Command::Breaking {
                core_repo,
                core_version,
                manifest,
            } => {
                let config =
                    self.config
                        .clone()
                        .with_overrides(core_version.as_deref(), None, None)?;
                let report = self
                    .breaking_stage(&config, core_repo, manifest.as_deref())
                    .await?;
                Ok(RunResult::Breaking(report))
            }

            Command::Run {
                core_repo,
                instrumentation_repo,
                contrib_repo,
                use_index,
                index_url,
                target,
            } => {
                let resolved = self
                    .resolve_stage(core_repo, instrumentation_repo.as_deref())
                    .await?;

                let mut config = self.config.clone();
                config.core_version = Some(resolved.core_version.clone());
                if let Some(tag) = &resolved.instrumentation_version {
                    config.instrumentation_version = Some(tag.clone());
                }

                // The scan compares against the still-declared versions, so
                // it has to run before the manifest is rewritten.
                let report = match self
                    .breaking_stage(&config, core_repo, target.manifest.as_deref())
                    .await
                {
                    Ok(report) => Some(report),
                    Err(e) => {
                        eprintln!("warning: breaking-change scan skipped: {}", e);
                        None
                    }
                };

                let summary = self
                    .update_stage(
                        &config,
                        contrib_repo.as_deref(),
                        *use_index || index_url.is_some(),
                        index_url.as_deref(),
                        target,
                    )
                    .await?;

                Ok(RunResult::Full {
                    resolved,
                    report,
                    summary,
                })
            }
        }
    }

    /// Resolves the latest stable versions from the upstream feeds
    async fn resolve_stage(
        &self,
        core_repo: &str,
        instrumentation_repo: Option<&str>,
    ) -> anyhow::Result<ResolveOutcome> {
        let feed = GitHubFeed::new(self.client.clone());
        let mut progress = self.progress();

        progress.spinner(&format!("Resolving releases from {}", core_repo));
        let core = resolve_core_version(&feed, core_repo).await;
        progress.finish_and_clear();

        let core_version = core?
            .ok_or_else(|| anyhow!("no stable core release found in {}", core_repo))?;

        let instrumentation_version = match instrumentation_repo {
            Some(repo) => {
                let mut progress = self.progress();
                progress.spinner(&format!("Resolving releases from {}", repo));
                let tag = resolve_latest_tag(&feed, repo).await;
                progress.finish_and_clear();

                match tag {
                    Ok(tag) => tag,
                    Err(e) => {
                        eprintln!("warning: {}", e);
                        None
                    }
                }
            }
            None => None,
        };

        self.publish(|ci| {
            ci.write_value("core_version", &core_version.to_string())?;
            if let Some(tag) = &instrumentation_version {
                ci.write_value("instrumentation_version", tag)?;
            }
            Ok(())
        });

        Ok(ResolveOutcome {
            core_version,
            instrumentation_version,
        })
    }

    /// Builds and applies the update plan
    async fn update_stage(
        &self,
        config: &Config,
        contrib_repo: Option<&str>,
        use_index: bool,
        index_url: Option<&str>,
        target: &TargetArgs,
    ) -> anyhow::Result<ReconcileSummary> {
        // Required input is validated before anything is touched.
        let core = config.require_core_version()?.clone();
        if target.descriptor.is_some() {
            config.require_instrumentation_version()?;
        }

        let manifest_path = self.manifest_path(target.manifest.as_deref());
        let mut doc = ManifestDocument::load(&manifest_path)?;
        let entries = doc.entries();

        let mut summary = ReconcileSummary::new(&manifest_path, target.dry_run);
        summary.core_version = Some(core.to_string());

        let mut versions = VersionMap::new();
        versions.set_core(core);

        if let Some(repo) = contrib_repo {
            let feed = GitHubFeed::new(self.client.clone());
            let mut progress = self.progress();
            progress.spinner(&format!("Resolving releases from {}", repo));
            let resolved = resolve_contrib_versions(&feed, repo, &entries).await;
            progress.finish_and_clear();

            match resolved {
                Ok(resolved) => {
                    for (name, version) in resolved {
                        versions.insert(name, version);
                    }
                }
                Err(e) => summary.errors.push(format!("contrib resolution failed: {}", e)),
            }
        }

        if use_index {
            let index = match index_url {
                Some(base) => NuGetIndex::with_base_url(self.client.clone(), base),
                None => NuGetIndex::new(self.client.clone()),
            };

            for entry in &entries {
                if entry.category().is_none() || versions.resolve(entry).is_some() {
                    continue;
                }

                let mut progress = self.progress();
                progress.spinner(&format!("Checking index for {}", entry.name));
                let listed = index.list_versions(&entry.name).await;
                progress.finish_and_clear();

                match listed {
                    Ok(listed) => {
                        if let Some(selected) = select_index_latest(&listed) {
                            if let Some(version) = CanonicalVersion::parse(&selected) {
                                versions.insert(entry.name.clone(), version);
                            }
                        }
                    }
                    Err(e) => summary
                        .errors
                        .push(format!("index lookup failed for {}: {}", entry.name, e)),
                }
            }
        }

        let plan = build_plan(&entries, &versions);

        for entry in &entries {
            if let Some(version) = versions.resolve(entry) {
                if version.to_string() == entry.declared {
                    summary.up_to_date.push(entry.name.clone());
                }
            }
        }

        let result = ChangeApplier::new(target.dry_run).apply(&mut doc, &plan);
        summary.updates = result.applied;
        summary.errors.extend(result.errors);

        if let Some(descriptor) = &target.descriptor {
            let version = config.require_instrumentation_version()?.to_string();
            let path = self.args.path.join(descriptor);
            match update_default_version(&path, &version, target.dry_run) {
                Ok(updated) => {
                    summary.descriptor = Some(DescriptorOutcome {
                        path,
                        updated,
                        version,
                    });
                }
                Err(e) => summary.errors.push(e.to_string()),
            }
        }

        if let Some(tool_name) = &target.package_tool {
            if !target.dry_run {
                let unresolved: Vec<String> = unresolved_entries(&entries, &versions)
                    .into_iter()
                    .map(|entry| entry.name.clone())
                    .collect();

                if !unresolved.is_empty() {
                    let tool = PackageTool::new(tool_name);
                    let runner = SystemCommandRunner::new();
                    summary.delegated =
                        delegate_updates(&tool, &runner, &self.args.path, &unresolved);
                }
            }
        } else if self.args.verbose {
            eprintln!("no package tool configured; delegated updates skipped");
        }

        let updated = summary.has_changes();
        self.publish(|ci| ci.write_value("updated", if updated { "true" } else { "false" }));

        Ok(summary)
    }

    /// Scans the release range between declared and target core versions
    async fn breaking_stage(
        &self,
        config: &Config,
        core_repo: &str,
        manifest: Option<&Path>,
    ) -> anyhow::Result<BreakingChangeReport> {
        let new_version = config.require_core_version()?.clone();

        let manifest_path = self.manifest_path(manifest);
        let doc = ManifestDocument::load(&manifest_path)?;
        let old_version = doc
            .entries()
            .iter()
            .find(|entry| entry.name == NAMESPACE_PREFIX)
            .and_then(|entry| entry.declared_canonical())
            .ok_or_else(|| {
                anyhow!(
                    "could not determine current core version from {}",
                    manifest_path.display()
                )
            })?;

        let feed = GitHubFeed::new(self.client.clone());
        let mut progress = self.progress();
        progress.spinner(&format!("Scanning {} for breaking changes", core_repo));
        let scanned = breaking::scan(&feed, core_repo, &old_version, &new_version).await;
        progress.finish_and_clear();

        let report = match scanned {
            Ok(report) => report,
            Err(e) => {
                eprintln!("warning: could not get releases for {}: {}", core_repo, e);
                BreakingChangeReport::new(core_repo, old_version, new_version)
            }
        };

        self.publish(|ci| ci.write_multiline("breaking_changes_info", &report.summary_markdown()));

        Ok(report)
    }

    /// Absolute manifest path for a run
    fn manifest_path(&self, manifest: Option<&Path>) -> PathBuf {
        self.args
            .path
            .join(manifest.unwrap_or_else(|| Path::new(DEFAULT_MANIFEST_FILE)))
    }

    /// Progress reporter honoring quiet mode
    fn progress(&self) -> Progress {
        Progress::new(!self.args.quiet && !self.args.json)
    }

    /// Writes to the CI output sink, when one is configured
    ///
    /// Sink write failures are reported but never abort the run.
    fn publish<F>(&self, write: F)
    where
        F: FnOnce(&CiOutput) -> std::io::Result<()>,
    {
        if let Some(path) = &self.config.output_sink {
            let ci = CiOutput::new(path);
            if let Err(e) = write(&ci) {
                eprintln!("warning: failed to write CI output: {}", e);
            }
        }
    }
}
