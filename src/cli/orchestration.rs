//! Main workflow orchestration logic
//!
//! Runs the single-pass pipeline: collect tags, resolve the current version,
//! derive the next one, set step outputs and publish the tag unless this is a
//! dry run. Argument parsing stays in [crate::cli]; everything here can be
//! driven programmatically with mock collaborators.

use crate::actions::{self, OutputSink};
use crate::boundary::BoundaryWarning;
use crate::bumper::{next_version, NextVersion};
use crate::collector::collect_version_tags;
use crate::config::Config;
use crate::error::{AffirmError, Result};
use crate::git::{Git2TagRepository, TagRepository, UnavailableRepository};
use crate::publish::{GitHubPublisher, TagPublisher};
use crate::resolver::{select_highest, version_candidates, ResolvedVersion};
use crate::ui;

/// Raw workflow inputs, before validation
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowArgs {
    /// Deployable target used as the tag prefix
    pub deployable_target: Option<String>,

    /// Skip publishing; outputs are still set
    pub dry_run: bool,

    /// Token authorized to create refs
    pub github_token: Option<String>,

    /// Commit the new tag points at
    pub sha: Option<String>,

    /// Repository in `owner/repo` form
    pub repository: Option<String>,
}

/// Validated inputs of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub target: String,
    pub sha: String,
    pub dry_run: bool,
    /// Present whenever `dry_run` is false
    pub github_token: Option<String>,
    /// Present whenever `dry_run` is false
    pub repository: Option<String>,
}

impl WorkflowArgs {
    /// Check required inputs before any stage runs.
    ///
    /// The commit sha is checked first; the token and repository are only
    /// required when the tag will be published.
    pub fn into_context(self) -> Result<RunContext> {
        let sha = self
            .sha
            .ok_or_else(|| AffirmError::missing_context("GITHUB_SHA"))?;
        let target = self
            .deployable_target
            .ok_or_else(|| AffirmError::missing_context("deployable_target"))?;

        if !self.dry_run {
            if self.github_token.is_none() {
                return Err(AffirmError::missing_context("github_token"));
            }
            if self.repository.is_none() {
                return Err(AffirmError::missing_context("GITHUB_REPOSITORY"));
            }
        }

        Ok(RunContext {
            target,
            sha,
            dry_run: self.dry_run,
            github_token: self.github_token,
            repository: self.repository,
        })
    }
}

/// Result of a successful workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version resolved from existing tags
    pub previous: ResolvedVersion,

    /// Version and tag that were computed
    pub next: NextVersion,

    /// Non-fatal problems met along the way
    pub warnings: Vec<BoundaryWarning>,

    /// Whether the tag was created on the provider
    pub published: bool,
}

/// Run the pipeline with injected collaborators.
///
/// Outputs are set as soon as each value is known, so a publish failure
/// still leaves `previous_version`, `new_version` and `new_tag` in place.
///
/// # Arguments
///
/// * `ctx` - Validated run inputs
/// * `config` - Tag scheme, remote and provider settings
/// * `repo` - Tag source
/// * `publisher` - Tag publisher, required unless `ctx.dry_run`
/// * `outputs` - Step output destination
pub fn run_workflow<R, P, O>(
    ctx: &RunContext,
    config: &Config,
    repo: &R,
    publisher: Option<&P>,
    outputs: &mut O,
) -> Result<WorkflowResult>
where
    R: TagRepository + ?Sized,
    P: TagPublisher + ?Sized,
    O: OutputSink + ?Sized,
{
    let scheme = config.tag_scheme();
    ui::display_status(&format!("Resolving version tags for '{}'", ctx.target));

    let collected = collect_version_tags(repo, &config.git.remote, &ctx.target, &scheme);
    let mut warnings = collected.warnings;

    let candidates = version_candidates(&ctx.target, &collected.tags, &scheme);
    warnings.extend(
        candidates
            .iter()
            .filter(|c| !c.is_valid())
            .map(|c| BoundaryWarning::UnparsableTag { tag: c.tag.clone() }),
    );

    let previous = select_highest(&ctx.target, candidates, &scheme).map_err(|e| {
        AffirmError::resolution(format!(
            "No last version found for deployable target {}: {}",
            ctx.target, e
        ))
    })?;
    if previous.is_default {
        warnings.push(BoundaryWarning::NoVersionTags {
            target: ctx.target.clone(),
            default_tag: previous.tag.clone(),
        });
    }
    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }
    outputs.set_output(actions::OUTPUT_PREVIOUS_VERSION, &previous.to_json()?)?;

    let next = next_version(&ctx.target, &previous, &scheme);
    outputs.set_output(actions::OUTPUT_NEW_VERSION, &next.version_text)?;
    outputs.set_output(actions::OUTPUT_NEW_TAG, &next.tag)?;
    ui::display_version_change(&previous.tag, &next.tag, next.bump);

    if ctx.dry_run {
        tracing::info!("Dry run: not performing tag action.");
        ui::display_status("Dry run: not performing tag action.");
        return Ok(WorkflowResult {
            previous,
            next,
            warnings,
            published: false,
        });
    }

    let publisher = publisher.ok_or_else(|| AffirmError::missing_context("tag publisher"))?;
    tracing::debug!(tag = %next.tag, sha = %ctx.sha, "pushing new tag to the repo");
    publisher.create_tag_ref(&next.tag, &ctx.sha)?;
    ui::display_success(&format!("Created tag {} at {}", next.tag, ctx.sha));

    Ok(WorkflowResult {
        previous,
        next,
        warnings,
        published: true,
    })
}

/// Open the tag source at `repo_path`.
///
/// A path outside any repository yields an [UnavailableRepository], so the
/// run continues from the default version instead of aborting.
pub fn open_tag_repository(
    repo_path: &std::path::Path,
    token: Option<String>,
) -> Box<dyn TagRepository> {
    match Git2TagRepository::open(repo_path) {
        Ok(repo) => Box::new(repo.with_token(token)),
        Err(AffirmError::Git(e)) => {
            tracing::debug!(path = %repo_path.display(), error = %e, "repository unavailable");
            Box::new(UnavailableRepository::new(&e))
        }
        Err(e) => Box::new(UnavailableRepository::new(&git2::Error::from_str(&e.to_string()))),
    }
}

/// Run the pipeline against a local git repository and the GitHub API.
///
/// `api_url` overrides the configured endpoint when set.
pub fn run_publish_workflow(
    ctx: &RunContext,
    config: &Config,
    repo_path: &std::path::Path,
    api_url: Option<&str>,
    outputs: &mut dyn OutputSink,
) -> Result<WorkflowResult> {
    let repo = open_tag_repository(repo_path, ctx.github_token.clone());

    let publisher = match (&ctx.github_token, &ctx.repository) {
        (Some(token), Some(repository)) if !ctx.dry_run => {
            let api_url = api_url.unwrap_or(&config.github.api_url);
            Some(GitHubPublisher::new(api_url, repository, token.clone())?)
        }
        _ => None,
    };

    run_workflow(ctx, config, repo.as_ref(), publisher.as_ref(), outputs)
}
