//! Command-line interface.
//!
//! `mavenpages [--repo DIR] [--config FILE] [-v...] [TASK]...`. Tasks run in
//! the order given; no task means `help`.

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error};

use crate::config::RepoConfig;
use crate::layout::RepoLayout;
use crate::tasks::TaskRegistry;
use crate::util::RepoResult;

/// Maintain a statically hosted Maven repository
#[derive(Debug, Parser)]
#[command(name = "mavenpages", version, about)]
pub struct Cli {
    /// Repository root (the directory holding README.md, LICENSE and the content root)
    #[arg(long, env = "MAVENPAGES_REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Configuration file; defaults to <repo>/mavenpages.toml when present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Tasks to run: help, build, build-poms, build-checksums, build-indices,
    /// clean, clean-poms, clean-checksums, clean-indices
    pub tasks: Vec<String>,
}

/// Load the configuration, build the registry and run the requested tasks
pub fn run(cli: Cli) -> RepoResult<()> {
    let config = match &cli.config {
        Some(path) => RepoConfig::load(path)?,
        None => RepoConfig::load_from_repo(&cli.repo)?,
    };
    let layout = RepoLayout::new(cli.repo.clone(), config);
    let registry = TaskRegistry::with_builtin_tasks()?;

    debug!(repo = %cli.repo.display(), tasks = ?cli.tasks, "running tasks");
    let result = registry.run_requested(cli.tasks.as_slice(), &layout);
    if let Err(err) = &result {
        error!(error = %err, "run aborted");
    }
    result
}
