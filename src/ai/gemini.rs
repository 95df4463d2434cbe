use super::provider::{static_models, Provider, DEFAULT_MODEL};
use crate::error::Result;

pub struct Gemini;

impl Provider for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn binary(&self) -> &'static str {
        "gemini"
    }

    // The gemini CLI has no discovery command
    fn list_models(&self) -> Result<Vec<String>> {
        Ok(static_models(&[
            DEFAULT_MODEL,
            "gemini-2.5-pro",
            "gemini-2.5-flash",
            "gemini-2.5-flash-lite",
        ]))
    }

    fn command_args(&self, model: Option<&str>) -> Vec<String> {
        match model {
            Some(model) => vec!["--model".into(), model.into()],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_models_start_with_default() {
        let models = Gemini.list_models().unwrap();
        assert_eq!(models[0], DEFAULT_MODEL);
        assert!(models.contains(&"gemini-2.5-flash".to_string()));
    }

    #[test]
    fn test_command_args() {
        assert!(Gemini.command_args(None).is_empty());
        assert_eq!(
            Gemini.command_args(Some("gemini-2.5-pro")),
            vec!["--model", "gemini-2.5-pro"]
        );
    }
}
