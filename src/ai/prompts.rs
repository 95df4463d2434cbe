use super::provider::{Request, Task};

/// Topic break between rules, data and trigger
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

const COMMIT_RULES: &str = r#"You are a git commit message generator.
Follow the Conventional Commits specification.

Format:
<type>[optional scope]: <description>

[optional body]

Rules:
- Types: fix, feat, build, chore, ci, docs, style, refactor, perf, test.
- Use present tense.
- Max title length: 50 chars.
- No markdown code blocks.
- No conversational text."#;

pub const BRIEF_CONSTRAINT: &str = "Constraint: I prefer a very short, one-sentence summary.";
pub const COMMIT_EMOJI_CONSTRAINT: &str =
    "Constraint: Start the title with the matching gitmoji (e.g. 🐛 fix: ..., ✨ feat: ...).";

const COMMIT_TRIGGER: &str =
    "Based on the diff above, generate the commit message now. Output raw text only.";

const TAG_RULES: &str = r#"You are a release notes writer for a software project.
Write release notes for the commits listed below.

Format:
- First line: a short, creative title for this release.
- Then one blank line.
- Then the body, grouped by category, for example:
Features:
- ...
Bug Fixes:
- ...
Miscellaneous:
- ...

Rules:
- Leave out empty categories.
- Plain text only. Do not use markdown headings or any line starting with a hash sign.
- Do not include commit hashes.
- Rephrase commit subjects so end users understand them.
- Keep a professional, user-friendly tone.
- No conversational text."#;

pub const TAG_EMOJI_CONSTRAINT: &str =
    "Constraint: Prefix every category header with a fitting emoji (e.g. ✨ Features:, 🐛 Bug Fixes:).";

const TAG_TRIGGER: &str = "Generate the release notes now. Output raw text only.";

/// Assemble the full stdin payload for an external tool: rules, data, trigger
pub fn build_prompt(req: &Request) -> String {
    let (rules, data, trigger) = match req.task {
        Task::Commit => (commit_rules(req), commit_data(req), COMMIT_TRIGGER),
        Task::Tag => (tag_rules(req), tag_data(req), TAG_TRIGGER),
    };

    [rules.as_str(), data.as_str(), trigger].join(SECTION_SEPARATOR)
}

fn commit_rules(req: &Request) -> String {
    let mut rules = COMMIT_RULES.to_string();

    if req.is_brief {
        rules.push('\n');
        rules.push_str(BRIEF_CONSTRAINT);
    }

    if req.use_emoji {
        rules.push('\n');
        rules.push_str(COMMIT_EMOJI_CONSTRAINT);
    }

    rules
}

fn commit_data(req: &Request) -> String {
    format!(
        "Files changed:\n{}\n\nDiff:\n```diff\n{}\n```",
        req.staged_files.trim(),
        req.diff.trim_end()
    )
}

fn tag_rules(req: &Request) -> String {
    let mut rules = TAG_RULES.to_string();

    if req.use_emoji {
        rules.push('\n');
        rules.push_str(TAG_EMOJI_CONSTRAINT);
    }

    rules
}

fn tag_data(req: &Request) -> String {
    format!("Commits since last release:\n{}", req.diff.trim())
}
