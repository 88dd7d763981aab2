use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use affirm::cli::{orchestration, Args};
use affirm::{actions, config, telemetry, ui};

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    telemetry::init_tracing(args.json, level);

    if let Err(e) = run(&args) {
        ui::display_failure(&format!("{:#}", e), actions::in_github_actions());
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    // Missing inputs abort before any file or repository is touched
    let ctx = args.workflow_args().into_context()?;
    let config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;

    let mut outputs = actions::output_sink_from_env();
    let result = orchestration::run_publish_workflow(
        &ctx,
        &config,
        &args.repo_path,
        args.api_url.as_deref(),
        outputs.as_mut(),
    )?;

    tracing::debug!(
        previous = %result.previous.tag,
        new_tag = %result.next.tag,
        published = result.published,
        "run complete"
    );
    Ok(())
}
