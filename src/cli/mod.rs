//! Command-line surface: argument parsing and the run workflow.

pub mod orchestration;

use std::path::PathBuf;

use clap::Parser;

use orchestration::WorkflowArgs;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "affirm",
    version,
    about = "Compute and publish the next version tag for a deployable target"
)]
pub struct Args {
    #[arg(
        long,
        env = "INPUT_DEPLOYABLE_TARGET",
        help = "Deployable target used as the tag prefix"
    )]
    pub deployable_target: Option<String>,

    #[arg(
        long,
        env = "INPUT_DRY_RUN",
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Compute outputs without creating the tag (any value containing 'true')"
    )]
    pub dry_run: Option<String>,

    #[arg(
        long,
        env = "INPUT_GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token used to create the tag (falls back to GITHUB_TOKEN)"
    )]
    pub github_token: Option<String>,

    #[arg(long, env = "GITHUB_SHA", help = "Commit the new tag points at")]
    pub sha: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository in owner/repo form")]
    pub repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", help = "GitHub REST API base URL")]
    pub api_url: Option<String>,

    #[arg(long, default_value = ".", help = "Path inside the git repository")]
    pub repo_path: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, help = "Emit JSON-formatted log lines")]
    pub json: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Args {
    /// Workflow inputs carried by these arguments
    pub fn workflow_args(&self) -> WorkflowArgs {
        let github_token = non_empty(&self.github_token)
            .or_else(|| non_empty(&std::env::var("GITHUB_TOKEN").ok()));

        WorkflowArgs {
            deployable_target: non_empty(&self.deployable_target),
            dry_run: crate::actions::is_dry_run(self.dry_run.as_deref()),
            github_token,
            sha: non_empty(&self.sha),
            repository: non_empty(&self.repository),
        }
    }
}
