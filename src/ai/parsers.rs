//! Turning the model listings of external tools into plain identifiers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::provider::DEFAULT_MODEL;

/// `--model <name>  ... choices: ("a", "b", ...)` as printed by `--help`.
///
/// The search may cross line breaks only onto continuation lines, so it never
/// runs into the next option's help.
static CHOICES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"--model(?:[^\w\n-]|\n[ \t]*[^\s-])(?:[^\n]|\n[ \t]*[^\s-])*?choices:\s*\(?([^)]+)\)",
    )
    .expect("choices pattern is valid")
});

/// Parse a table such as `ollama list`: first field of every non-blank line.
///
/// When `header` is given, a first line starting with that column name is skipped.
/// Only the first non-blank line is considered a header.
pub fn parse_tabular(raw: &str, header: Option<&str>) -> Vec<String> {
    let mut models = Vec::new();

    for (i, line) in raw.trim().lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if i == 0 && header.is_some_and(|h| line.starts_with(h)) {
            continue;
        }

        if let Some(field) = line.split_whitespace().next() {
            models.push(field.to_string());
        }
    }

    models
}

/// Parse the `--model` choice list out of help text.
///
/// Returns `None` if the help text has no such list. On success the result
/// always starts with the `(default)` sentinel.
pub fn parse_choices(help: &str) -> Option<Vec<String>> {
    let captured = CHOICES_REGEX.captures(help)?.get(1)?.as_str();

    let mut models = vec![DEFAULT_MODEL.to_string()];
    models.extend(
        captured
            .split(',')
            .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\''))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string),
    );

    Some(models)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tabular_with_header() {
        let raw = "NAME\nfoo:latest  1.2GB\nbar:latest 900MB\n";
        assert_eq!(
            parse_tabular(raw, Some("NAME")),
            vec!["foo:latest", "bar:latest"]
        );
    }

    #[test]
    fn test_parse_tabular_real_ollama_listing() {
        let raw = "NAME                ID              SIZE      MODIFIED\r\n\
                   gemma3:4b           a2af6cc3eb7f    3.3 GB    2 weeks ago\r\n\
                   qwen2.5-coder:7b    2b0496514337    4.7 GB    3 months ago\r\n\
                   \r\n\r\n";
        assert_eq!(
            parse_tabular(raw, Some("NAME")),
            vec!["gemma3:4b", "qwen2.5-coder:7b"]
        );
    }

    #[test]
    fn test_parse_tabular_header_only_at_first_line() {
        // A model that happens to start with the header token is kept
        let raw = "NAME ID\nNAMEless:1b x\n";
        assert_eq!(parse_tabular(raw, Some("NAME")), vec!["NAMEless:1b"]);

        // Leading blank lines do not hide the header
        let raw = "\n\r\nNAME ID\nfoo x\n";
        assert_eq!(parse_tabular(raw, Some("NAME")), vec!["foo"]);

        // A header-like line further down is data
        let raw = "foo x\nNAME ID\n";
        assert_eq!(parse_tabular(raw, Some("NAME")), vec!["foo", "NAME"]);
    }

    #[test]
    fn test_parse_tabular_without_header() {
        let raw = "opencode/big-pickle\nanthropic/claude-sonnet-4-5\n\n";
        assert_eq!(
            parse_tabular(raw, None),
            vec!["opencode/big-pickle", "anthropic/claude-sonnet-4-5"]
        );
        assert!(parse_tabular("", None).is_empty());
        assert!(parse_tabular("\n\n  \n", Some("NAME")).is_empty());
    }

    #[test]
    fn test_parse_choices() {
        let help = r#"--model <name>  choices: ("alpha", "beta")"#;
        assert_eq!(
            parse_choices(help).unwrap(),
            vec!["(default)", "alpha", "beta"]
        );
    }

    #[test]
    fn test_parse_choices_multiline_help() {
        let help = "Usage: copilot [options]\r\n\
                    \r\n\
                    Options:\r\n  \
                    --model <model>   Set the AI model to use (choices:\r\n                    \
                    \"claude-sonnet-4.5\", \"gpt-5\",\r\n                    \
                    \"claude-haiku-4.5\")\r\n  \
                    -s, --silent      Output only the agent response\r\n";
        assert_eq!(
            parse_choices(help).unwrap(),
            vec!["(default)", "claude-sonnet-4.5", "gpt-5", "claude-haiku-4.5"]
        );
    }

    #[test]
    fn test_parse_choices_missing() {
        assert!(parse_choices("Usage: copilot [options]\n  -s, --silent\n").is_none());
        assert!(parse_choices("--model <name>  the model to use").is_none());
    }

    #[test]
    fn test_parse_choices_ignores_other_options() {
        let help = "  --model <model>  Set the AI model to use\n  \
                    --log-level <level>  (choices: \"none\", \"error\", \"debug\")\n";
        assert!(parse_choices(help).is_none());

        let help = "  --model-id <id>  (choices: \"x\")\n";
        assert!(parse_choices(help).is_none());

        let help = "  --model\n  --log-level <level>  (choices: \"none\")\n";
        assert!(parse_choices(help).is_none());
    }

    #[test]
    fn test_parse_choices_on_continuation_line() {
        let help = "  --model <model>  Set the AI model to use\n\
                    \x20                  (choices: \"gpt-5\", \"claude-sonnet-4.5\")\n  \
                    --log-level <level>  (choices: \"none\", \"debug\")\n";
        assert_eq!(
            parse_choices(help).unwrap(),
            vec!["(default)", "gpt-5", "claude-sonnet-4.5"]
        );
    }
}
