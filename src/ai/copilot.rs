use super::parsers::parse_choices;
use super::provider::{discover, Provider};
use crate::error::{QuillError, Result};

pub struct Copilot;

impl Provider for Copilot {
    fn name(&self) -> &'static str {
        "copilot"
    }

    fn binary(&self) -> &'static str {
        "copilot"
    }

    /// Scraped from the `--model` choices in `copilot --help`
    fn list_models(&self) -> Result<Vec<String>> {
        let help = discover(self, &["--help"])?;
        parse_choices(&help).ok_or_else(|| QuillError::ModelList {
            provider: self.name().to_string(),
            reason: "no --model choices found in help text".to_string(),
        })
    }

    fn command_args(&self, model: Option<&str>) -> Vec<String> {
        let mut args = vec!["-s".to_string()];
        if let Some(model) = model {
            args.push("--model".into());
            args.push(model.into());
        }
        args
    }
}
