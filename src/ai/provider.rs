use std::time::Duration;

use tracing::debug;

use super::{exec, prompts};
use crate::error::{QuillError, Result};

/// Sentinel model entry meaning "let the tool pick its own default"
pub const DEFAULT_MODEL: &str = "(default)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Commit,
    Tag,
}

/// One generation request. For `Task::Tag` the `diff` field carries the commit log.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub task: Task,
    pub diff: String,
    pub staged_files: String,
    pub model: Option<String>,
    pub is_brief: bool,
    pub use_emoji: bool,
    pub timeout: Option<Duration>,
}

impl Default for Task {
    fn default() -> Self {
        Self::Commit
    }
}

impl Request {
    pub fn commit(diff: impl Into<String>, staged_files: impl Into<String>) -> Self {
        Self {
            task: Task::Commit,
            diff: diff.into(),
            staged_files: staged_files.into(),
            ..Self::default()
        }
    }

    pub fn tag(log: impl Into<String>) -> Self {
        Self {
            task: Task::Tag,
            diff: log.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn brief(mut self, is_brief: bool) -> Self {
        self.is_brief = is_brief;
        self
    }

    pub fn emoji(mut self, use_emoji: bool) -> Self {
        self.use_emoji = use_emoji;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The model to pass on the command line, if any.
    /// Empty strings and the "(default)" sentinel both mean "omit the flag".
    pub fn model_flag(&self) -> Option<&str> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != DEFAULT_MODEL)
    }
}

/// An external AI command-line tool.
///
/// Implementations are stateless unit structs. Only `name`, `binary`,
/// `list_models` and `command_args` are tool specific; spawning, prompt
/// delivery and output cleanup are shared through the provided methods.
pub trait Provider: Send + Sync {
    /// Stable identifier, unique across the registry ignoring case
    fn name(&self) -> &'static str;

    /// Executable looked up on PATH
    fn binary(&self) -> &'static str;

    fn list_models(&self) -> Result<Vec<String>>;

    /// Map a model choice onto this tool's argv
    fn command_args(&self, model: Option<&str>) -> Vec<String>;

    /// Pure PATH lookup, never spawns the tool
    fn is_available(&self) -> bool {
        exec::is_on_path(self.binary())
    }

    fn generate(&self, req: &Request) -> Result<String> {
        let prompt = prompts::build_prompt(req);
        let args = self.command_args(req.model_flag());

        debug!(
            provider = self.name(),
            model = req.model_flag().unwrap_or(DEFAULT_MODEL),
            prompt_len = prompt.len(),
            "generating"
        );

        let output = exec::run(self.binary(), &args, Some(prompt.as_str()), req.timeout).map_err(
            |source| QuillError::Generation {
                provider: self.name().to_string(),
                source,
            },
        )?;

        Ok(clean_output(&output))
    }
}

/// Run a tool's discovery command, mapping any failure to `ModelList`
pub(crate) fn discover(provider: &dyn Provider, args: &[&str]) -> Result<String> {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    exec::run(provider.binary(), &args, None, None).map_err(|e| QuillError::ModelList {
        provider: provider.name().to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn static_models(models: &[&str]) -> Vec<String> {
    models.iter().map(|m| m.to_string()).collect()
}

/// Trim and drop code fences some tools wrap around their answer
pub fn clean_output(text: &str) -> String {
    strip_code_blocks(text).replace("```", "").trim().to_string()
}

/// Strip a markdown code block (with optional language tag) wrapping the whole text
fn strip_code_blocks(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with("```") && trimmed.ends_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 3 {
            return trimmed.to_string();
        }

        // Skip the opening fence line (``` or ```lang) and the closing one
        lines[1..lines.len() - 1].join("\n").trim().to_string()
    } else {
        trimmed.to_string()
    }
}
