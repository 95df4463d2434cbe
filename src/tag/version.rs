use anyhow::{anyhow, Result};
use semver::Version;

/// Version suggested when the repository has no tag yet
pub const FIRST_VERSION: &str = "v0.1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
    Major,
    Minor,
    Patch,
}

/// Parse a version string (with or without 'v' prefix)
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim_start_matches('v');
    Version::parse(cleaned).map_err(|e| anyhow!("Invalid version '{}': {}", version_str, e))
}

/// Conventional-commit bump implied by a `- <hash> <subject>` log
pub fn bump_for(log: &str) -> Bump {
    let mut bump = Bump::Patch;

    for line in log.lines() {
        let subject = line
            .trim()
            .trim_start_matches("- ")
            .split_once(' ')
            .map(|(_, subject)| subject)
            .unwrap_or("");
        let kind = subject.split(':').next().unwrap_or("");

        if kind.ends_with('!') || subject.contains("BREAKING CHANGE") {
            return Bump::Major;
        }
        if kind == "feat" || kind.starts_with("feat(") {
            bump = Bump::Minor;
        }
    }

    bump
}

/// Next tag after `last_tag`, keeping its `v` prefix.
/// `None` if the last tag is not a semantic version.
pub fn next_version(last_tag: &str, log: &str) -> Option<String> {
    if last_tag.is_empty() {
        return Some(FIRST_VERSION.to_string());
    }

    let mut version = parse_version(last_tag).ok()?;
    version.pre = semver::Prerelease::EMPTY;
    version.build = semver::BuildMetadata::EMPTY;

    match bump_for(log) {
        Bump::Major => {
            version.major += 1;
            version.minor = 0;
            version.patch = 0;
        }
        Bump::Minor => {
            version.minor += 1;
            version.patch = 0;
        }
        Bump::Patch => version.patch += 1,
    }

    let prefix = if last_tag.starts_with('v') { "v" } else { "" };
    Some(format!("{}{}", prefix, version))
}
