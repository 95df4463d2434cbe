use super::provider::{static_models, Provider, DEFAULT_MODEL};
use crate::error::Result;

pub struct Claude;

impl Provider for Claude {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn binary(&self) -> &'static str {
        "claude"
    }

    /// Model aliases accepted by `claude --model`
    fn list_models(&self) -> Result<Vec<String>> {
        Ok(static_models(&[DEFAULT_MODEL, "opus", "sonnet", "haiku"]))
    }

    fn command_args(&self, model: Option<&str>) -> Vec<String> {
        let mut args = vec!["-p".to_string()];
        if let Some(model) = model {
            args.push("--model".into());
            args.push(model.into());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::Request;

    #[test]
    fn test_default_sentinel_omits_model_flag() {
        let req = Request::commit("", "").with_model(Some(DEFAULT_MODEL.into()));
        assert_eq!(Claude.command_args(req.model_flag()), vec!["-p"]);

        let req = Request::commit("", "").with_model(Some("opus".into()));
        assert_eq!(
            Claude.command_args(req.model_flag()),
            vec!["-p", "--model", "opus"]
        );
    }

    #[test]
    fn test_static_models() {
        assert_eq!(
            Claude.list_models().unwrap(),
            vec![DEFAULT_MODEL, "opus", "sonnet", "haiku"]
        );
    }
}
