use super::parsers::parse_tabular;
use super::provider::{discover, Provider};
use crate::error::Result;

pub struct Opencode;

impl Provider for Opencode {
    fn name(&self) -> &'static str {
        "opencode"
    }

    fn binary(&self) -> &'static str {
        "opencode"
    }

    /// `opencode models` prints one `provider/model` per line, no header
    fn list_models(&self) -> Result<Vec<String>> {
        let listing = discover(self, &["models"])?;
        Ok(parse_tabular(&listing, None))
    }

    fn command_args(&self, model: Option<&str>) -> Vec<String> {
        let mut args = vec!["run".to_string()];
        if let Some(model) = model {
            args.push("--model".into());
            args.push(model.into());
        }
        args
    }
}
