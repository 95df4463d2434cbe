use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Repository, Sort};
use tracing::debug;

use crate::error::Result;

/// Most recent tag reachable from HEAD, like `git describe --tags --abbrev=0`.
/// Empty when there is none.
pub fn last_tag(repo: &Repository) -> String {
    let mut opts = DescribeOptions::new();
    opts.describe_tags();
    let mut format = DescribeFormatOptions::new();
    format.abbreviated_size(0);

    let described = repo
        .describe(&opts)
        .and_then(|d| d.format(Some(&format)));

    match described {
        Ok(tag) => tag.trim().to_string(),
        Err(e) => {
            debug!(error = %e, "no tag found");
            String::new()
        }
    }
}

/// One `- <short-hash> <subject>` line per commit reachable from HEAD but not
/// from `tag`, newest first. An empty `tag` walks the whole history.
///
/// A repository without commits yields an empty log.
pub fn commits_since(repo: &Repository, tag: &str) -> Result<String> {
    if let Err(e) = repo.head() {
        if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) {
            debug!(error = %e, "no commits yet");
            return Ok(String::new());
        }
        return Err(e.into());
    }

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    revwalk.push_head()?;

    if !tag.is_empty() {
        let tagged = repo.revparse_single(tag)?.peel_to_commit()?;
        revwalk.hide(tagged.id())?;
    }

    let mut lines = Vec::new();
    for oid in revwalk {
        let oid = oid?;
        let commit = repo.find_commit(oid)?;
        lines.push(format!(
            "- {} {}",
            &oid.to_string()[..7],
            commit.summary().unwrap_or("")
        ));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::{commit_all, init_repo, tag};

    #[test]
    fn test_last_tag_none() {
        let (dir, repo) = init_repo();
        commit_all(&repo, dir.path(), &[("a.txt", "1\n")], "feat: first");
        assert_eq!(last_tag(&repo), "");
    }

    #[test]
    fn test_last_tag_on_empty_repo() {
        let (_dir, repo) = init_repo();
        assert_eq!(last_tag(&repo), "");
    }

    #[test]
    fn test_commits_since_on_empty_repo() {
        let (_dir, repo) = init_repo();
        assert_eq!(commits_since(&repo, "").unwrap(), "");
    }

    #[test]
    fn test_last_tag_and_commits_since() {
        let (dir, repo) = init_repo();
        commit_all(&repo, dir.path(), &[("a.txt", "1\n")], "feat: first");
        let tagged = commit_all(&repo, dir.path(), &[("a.txt", "2\n")], "fix: second");
        tag(&repo, "v0.1.0", tagged);

        let third = commit_all(&repo, dir.path(), &[("b.txt", "3\n")], "fix: bug");
        let fourth = commit_all(&repo, dir.path(), &[("c.txt", "4\n")], "feat: add feature");

        assert_eq!(last_tag(&repo), "v0.1.0");

        let log = commits_since(&repo, "v0.1.0").unwrap();
        assert_eq!(
            log,
            format!(
                "- {} feat: add feature\n- {} fix: bug",
                &fourth.to_string()[..7],
                &third.to_string()[..7]
            )
        );
    }

    #[test]
    fn test_commits_since_empty_tag_walks_everything() {
        let (dir, repo) = init_repo();
        commit_all(&repo, dir.path(), &[("a.txt", "1\n")], "feat: first");
        commit_all(&repo, dir.path(), &[("a.txt", "2\n")], "fix: second");

        let log = commits_since(&repo, "").unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" fix: second"));
        assert!(lines[1].ends_with(" feat: first"));
        assert!(lines.iter().all(|l| l.starts_with("- ")));
    }

    #[test]
    fn test_commits_since_tag_at_head_is_empty() {
        let (dir, repo) = init_repo();
        let head = commit_all(&repo, dir.path(), &[("a.txt", "1\n")], "feat: first");
        tag(&repo, "v1.0.0", head);

        assert_eq!(commits_since(&repo, "v1.0.0").unwrap(), "");
    }

    #[test]
    fn test_commits_since_unknown_tag_is_error() {
        let (dir, repo) = init_repo();
        commit_all(&repo, dir.path(), &[("a.txt", "1\n")], "feat: first");
        assert!(commits_since(&repo, "v9.9.9").is_err());
    }
}
