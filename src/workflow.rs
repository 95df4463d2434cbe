use anyhow::Result;
use colored::Colorize;
use tracing::{debug, warn};

use crate::ai::{Provider, Registry};
use crate::config::Config;
use crate::error::QuillError;
use crate::ui::select;

/// Flags shared by `commit` and `tag`
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub emoji: bool,
}

/// Pick the provider: CLI flag > config > interactive menu over installed tools
pub fn resolve_provider(
    registry: Registry<'static>,
    cli_provider: Option<&str>,
    config: &Config,
) -> Result<&'static dyn Provider> {
    if let Some(name) = cli_provider {
        let provider = registry.resolve(name)?;
        if !provider.is_available() {
            return Err(QuillError::UnavailableProvider(provider.name().to_string()).into());
        }
        return Ok(provider);
    }

    if let Some(ref name) = config.default_provider {
        match registry.resolve(name) {
            Ok(provider) if provider.is_available() => {
                debug!(provider = provider.name(), "using configured provider");
                return Ok(provider);
            }
            Ok(provider) => warn!(provider = provider.name(), "configured provider is not installed"),
            Err(e) => warn!(error = %e, "ignoring default_provider"),
        }
    }

    let available = registry.list_available();
    if available.is_empty() {
        anyhow::bail!(
            "No AI CLI found. Install one of: {}",
            registry.names().join(", ")
        );
    }

    let names: Vec<String> = available.iter().map(|p| p.name().to_string()).collect();
    let choice = select("Select AI provider", &names)?.ok_or(QuillError::Cancelled)?;

    Ok(registry.resolve(&choice)?)
}

/// Pick the model: CLI flag > config > menu over the provider's models.
///
/// `None` lets the provider use its own default. A failed or empty model
/// listing skips the menu instead of failing.
pub fn resolve_model(
    provider: &dyn Provider,
    cli_model: Option<&str>,
    config: &Config,
) -> Result<Option<String>> {
    if let Some(model) = cli_model {
        return Ok(Some(model.to_string()));
    }

    if let Some(model) = config.model_for(provider.name()) {
        debug!(provider = provider.name(), model, "using configured model");
        return Ok(Some(model.to_string()));
    }

    debug!(provider = provider.name(), "fetching models");
    let models = match provider.list_models() {
        Ok(models) if !models.is_empty() => models,
        Ok(_) => {
            debug!(provider = provider.name(), "no models reported, using default");
            return Ok(None);
        }
        Err(e) => {
            debug!(error = %e, "model listing failed, using default");
            return Ok(None);
        }
    };

    let choice = select("Select model", &models)?.ok_or(QuillError::Cancelled)?;
    Ok(Some(choice))
}

/// Status line on stderr so stdout carries only the generated text
pub(crate) fn announce(what: &str, provider: &dyn Provider, model: Option<&str>) {
    let model = model
        .map(|m| format!(" ({})", m).dimmed().to_string())
        .unwrap_or_default();
    eprintln!(
        "{} Generating {} with {}{}...",
        "●".cyan(),
        what,
        provider.name().bold(),
        model
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listing(std::result::Result<Vec<String>, ()>);

    impl Provider for Listing {
        fn name(&self) -> &'static str {
            "listing"
        }

        fn binary(&self) -> &'static str {
            "git-quill-listing"
        }

        fn list_models(&self) -> crate::error::Result<Vec<String>> {
            self.0.clone().map_err(|_| QuillError::ModelList {
                provider: "listing".into(),
                reason: "boom".into(),
            })
        }

        fn command_args(&self, _model: Option<&str>) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_cli_model_wins() {
        let mut config = Config::default();
        config.models.insert("listing".into(), "from-config".into());
        let provider = Listing(Ok(vec!["a".into()]));

        let model = resolve_model(&provider, Some("from-cli"), &config).unwrap();
        assert_eq!(model.as_deref(), Some("from-cli"));

        let model = resolve_model(&provider, None, &config).unwrap();
        assert_eq!(model.as_deref(), Some("from-config"));
    }

    #[test]
    fn test_model_listing_failure_degrades_to_default() {
        let provider = Listing(Err(()));
        let model = resolve_model(&provider, None, &Config::default()).unwrap();
        assert_eq!(model, None);

        let provider = Listing(Ok(Vec::new()));
        let model = resolve_model(&provider, None, &Config::default()).unwrap();
        assert_eq!(model, None);
    }

    #[test]
    fn test_unknown_cli_provider() {
        let err = match resolve_provider(Registry::builtin(), Some("codex"), &Config::default()) {
            Ok(p) => panic!("resolved to {}", p.name()),
            Err(e) => e,
        };
        assert!(matches!(
            err.downcast_ref::<QuillError>(),
            Some(QuillError::ProviderNotFound { .. })
        ));
    }
}
