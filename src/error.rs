use thiserror::Error;

use crate::ai::exec::ExecError;

/// Errors raised by the provider layer and the git data source.
#[derive(Error, Debug)]
pub enum QuillError {
    /// The provider exists but its executable is not on PATH
    #[error("Provider '{0}' is not installed (its executable is not on PATH)")]
    UnavailableProvider(String),

    #[error("Unknown provider '{name}'. Known providers: {}", .valid.join(", "))]
    ProviderNotFound { name: String, valid: Vec<String> },

    /// Model discovery failed; callers degrade to "no model menu"
    #[error("Could not list models for {provider}: {reason}")]
    ModelList { provider: String, reason: String },

    /// The external tool could not be run or exited non-zero
    #[error("{provider} failed")]
    Generation {
        provider: String,
        #[source]
        source: ExecError,
    },

    #[error("No staged changes found (or all of them are ignored)")]
    NoStagedChanges,

    #[error("No new commits since {0}")]
    NoCommitsSinceTag(String),

    #[error("Selection cancelled.")]
    Cancelled,

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuillError {
    /// Nothing to do or the user backed out: report and exit 0
    pub fn is_graceful(&self) -> bool {
        matches!(
            self,
            Self::NoStagedChanges | Self::NoCommitsSinceTag(_) | Self::Cancelled
        )
    }
}

pub type Result<T> = std::result::Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graceful_variants() {
        assert!(QuillError::NoStagedChanges.is_graceful());
        assert!(QuillError::NoCommitsSinceTag("v1.0.0".into()).is_graceful());
        assert!(QuillError::Cancelled.is_graceful());
        assert!(!QuillError::UnavailableProvider("claude".into()).is_graceful());
        assert!(!QuillError::Generation {
            provider: "ollama".into(),
            source: ExecError::Failed("exit code 1".into()),
        }
        .is_graceful());
    }

    #[test]
    fn test_generation_keeps_cause() {
        let err = anyhow::Error::from(QuillError::Generation {
            provider: "claude".into(),
            source: ExecError::Failed("model not found".into()),
        });
        let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
        assert_eq!(chain, vec!["claude failed", "model not found"]);
    }

    #[test]
    fn test_not_found_lists_valid_names() {
        let err = QuillError::ProviderNotFound {
            name: "codex".into(),
            valid: vec!["ollama".into(), "claude".into()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown provider 'codex'. Known providers: ollama, claude"
        );
    }
}
