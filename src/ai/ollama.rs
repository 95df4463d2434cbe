use super::parsers::parse_tabular;
use super::provider::{discover, Provider};
use crate::error::Result;

/// `ollama run` needs a model, so one is always passed
pub const FALLBACK_MODEL: &str = "gemma3:4b";

pub struct Ollama;

impl Provider for Ollama {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn binary(&self) -> &'static str {
        "ollama"
    }

    fn list_models(&self) -> Result<Vec<String>> {
        let listing = discover(self, &["list"])?;
        Ok(parse_tabular(&listing, Some("NAME")))
    }

    fn command_args(&self, model: Option<&str>) -> Vec<String> {
        vec!["run".into(), model.unwrap_or(FALLBACK_MODEL).into()]
    }
}
