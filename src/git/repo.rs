use anyhow::{Context, Result};
use git2::Repository;

/// Open the repository containing the current directory
pub fn open_repo() -> Result<Repository> {
    Repository::open_from_env()
        .or_else(|_| Repository::discover("."))
        .context("Not a git repository (or any parent)")
}
