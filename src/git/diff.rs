use git2::{Delta, DiffOptions, Repository};
use globset::{Glob, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{QuillError, Result};

/// Default byte budget for the diff handed to a provider
pub const DEFAULT_DIFF_LIMIT: usize = 20_000;

pub const TRUNCATION_MARKER: &str = "\n... [Diff Truncated]";

/// Files whose diffs are noise to a language model
const IGNORED_PATTERNS: &[&str] = &[
    "*.lock",
    "**/package-lock.json",
    "**/yarn.lock",
    "**/pnpm-lock.yaml",
    "**/go.sum",
    "**/devenv.lock",
    "**/devenv.yaml",
    "*.svg",
    "*.min.js",
    "*.map",
];

static IGNORED: Lazy<GlobSet> = Lazy::new(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in IGNORED_PATTERNS {
        builder.add(Glob::new(pattern).expect("ignore pattern is valid"));
    }
    builder.build().expect("ignore set builds")
});

/// Staged diff (HEAD → index) minus ignored files, truncated to `limit` bytes.
///
/// `limit == 0` disables truncation.
pub fn staged_diff(repo: &Repository, limit: usize) -> Result<String> {
    let head = repo.head().ok().and_then(|h| h.peel_to_tree().ok());
    let index = repo.index()?;

    let mut opts = DiffOptions::new();
    opts.include_untracked(false);

    let diff = repo.diff_tree_to_index(head.as_ref(), Some(&index), Some(&mut opts))?;

    let mut diff_text = String::new();
    let mut skipped = 0usize;

    diff.print(git2::DiffFormat::Patch, |delta, _hunk, line| {
        let path = delta.new_file().path().or_else(|| delta.old_file().path());
        if path.is_some_and(|p| IGNORED.is_match(p)) {
            if line.origin() == 'F' {
                skipped += 1;
            }
            return true;
        }

        match line.origin() {
            '+' | '-' | ' ' => diff_text.push(line.origin()),
            _ => {}
        }

        diff_text.push_str(&String::from_utf8_lossy(line.content()));

        true
    })?;

    debug!(bytes = diff_text.len(), skipped, "read staged diff");

    if diff_text.trim().is_empty() {
        return Err(QuillError::NoStagedChanges);
    }

    Ok(truncate_diff(diff_text, limit))
}

/// Cut `diff` to at most `limit` bytes (on a char boundary) and append the marker
pub fn truncate_diff(mut diff: String, limit: usize) -> String {
    if limit == 0 || diff.len() <= limit {
        return diff;
    }

    let mut cut = limit;
    while !diff.is_char_boundary(cut) {
        cut -= 1;
    }

    diff.truncate(cut);
    diff.push_str(TRUNCATION_MARKER);
    diff
}

/// `git diff --cached --name-status` style listing
pub fn staged_files(repo: &Repository) -> Result<String> {
    let head = repo.head().ok().and_then(|h| h.peel_to_tree().ok());
    let index = repo.index()?;

    let diff = repo.diff_tree_to_index(head.as_ref(), Some(&index), None)?;

    let mut lines = Vec::new();
    for delta in diff.deltas() {
        let status = match delta.status() {
            Delta::Added => 'A',
            Delta::Deleted => 'D',
            Delta::Renamed => 'R',
            Delta::Copied => 'C',
            Delta::Typechange => 'T',
            _ => 'M',
        };

        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        lines.push(format!("{}\t{}", status, path));
    }

    Ok(lines.join("\n"))
}
