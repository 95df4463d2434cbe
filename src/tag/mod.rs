mod version;

use anyhow::{Context, Result};
use colored::Colorize;
use git2::Repository;
use tracing::debug;

use crate::ai::{Registry, Request};
use crate::config::Config;
use crate::error::QuillError;
use crate::git::{commits_since, last_tag};
use crate::workflow::{announce, resolve_model, resolve_provider, Options};

pub use version::{bump_for, next_version, parse_version, Bump};

/// Generate release notes for the commits since the last tag
pub fn run_tag_workflow(repo: &Repository, opts: &Options, raw: bool, config: &Config) -> Result<()> {
    let tag = last_tag(repo);
    let log = commits_since(repo, &tag).context("Failed to read commit log")?;
    debug!(last_tag = %tag, commits = log.lines().count(), "collected commits");

    if log.trim().is_empty() {
        let since = if tag.is_empty() { "the first commit" } else { tag.as_str() };
        return Err(QuillError::NoCommitsSinceTag(since.to_string()).into());
    }

    let registry = Registry::builtin();
    let provider = resolve_provider(registry, opts.provider.as_deref(), config)?;
    let model = resolve_model(provider, opts.model.as_deref(), config)?;

    let req = Request::tag(log.as_str())
        .with_model(model)
        .emoji(opts.emoji || config.emoji)
        .with_timeout(config.timeout());

    announce("release notes", provider, req.model_flag());
    let notes = provider.generate(&req)?;

    println!("{}", notes);

    if !raw {
        print_footer(&tag, &log);
    }

    Ok(())
}

fn print_footer(tag: &str, log: &str) {
    let next = next_version(tag, log).unwrap_or_else(|| "<version>".to_string());
    let since = if tag.is_empty() {
        "the first commit".to_string()
    } else {
        tag.to_string()
    };

    println!();
    println!("{}", "─".repeat(50).dimmed());
    println!(
        "{} {} commit(s) since {}",
        "●".cyan(),
        log.lines().count(),
        since
    );
    println!("  Save the notes above to a file and create the tag with:");
    println!("  {}", format!("git tag -a {} -F <notes-file>", next).green());
}
