use anyhow::{Context, Result};
use git2::Repository;
use tracing::debug;

use crate::ai::{Registry, Request};
use crate::config::Config;
use crate::git::{staged_diff, staged_files};
use crate::workflow::{announce, resolve_model, resolve_provider, Options};

/// Main entry point for the commit workflow: print a message for the staged changes
pub fn run_commit_workflow(
    repo: &Repository,
    opts: &Options,
    brief: bool,
    config: &Config,
) -> Result<()> {
    // Bail out before any menu if there is nothing to describe
    let diff = staged_diff(repo, config.diff_limit)?;
    let files = staged_files(repo).context("Failed to list staged files")?;
    debug!(diff_bytes = diff.len(), files = files.lines().count(), "collected staged changes");

    let registry = Registry::builtin();
    let provider = resolve_provider(registry, opts.provider.as_deref(), config)?;
    let model = resolve_model(provider, opts.model.as_deref(), config)?;

    let req = Request::commit(diff, files)
        .with_model(model)
        .brief(brief)
        .emoji(opts.emoji || config.emoji)
        .with_timeout(config.timeout());

    announce("commit message", provider, req.model_flag());
    let message = provider.generate(&req)?;

    println!("{}", message);

    Ok(())
}
