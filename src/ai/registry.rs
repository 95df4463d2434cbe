use std::thread;

use tracing::debug;

use super::{Claude, Copilot, Gemini, Ollama, Opencode, Provider};
use crate::error::{QuillError, Result};

/// Every known provider. Order is the menu order and the tie-break when
/// several tools are installed.
static PROVIDERS: [&dyn Provider; 5] = [&Ollama, &Opencode, &Gemini, &Copilot, &Claude];

/// Read-only catalog of providers
#[derive(Clone, Copy)]
pub struct Registry<'a> {
    providers: &'a [&'a dyn Provider],
}

impl Registry<'static> {
    pub fn builtin() -> Self {
        Self::new(&PROVIDERS)
    }
}

impl<'a> Registry<'a> {
    pub fn new(providers: &'a [&'a dyn Provider]) -> Self {
        Self { providers }
    }

    pub fn all(&self) -> &'a [&'a dyn Provider] {
        self.providers
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Providers whose executable is on PATH, in declaration order.
    ///
    /// Probes run in parallel; results are joined back in declaration order.
    pub fn list_available(&self) -> Vec<&'a dyn Provider> {
        let providers = self.providers;

        let probes: Vec<bool> = thread::scope(|s| {
            let handles: Vec<_> = providers
                .iter()
                .map(|&p| s.spawn(move || p.is_available()))
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or(false))
                .collect()
        });

        let available: Vec<&'a dyn Provider> = providers
            .iter()
            .zip(probes)
            .filter(|(_, ok)| *ok)
            .map(|(&p, _)| p)
            .collect();

        let names: Vec<&str> = available.iter().map(|p| p.name()).collect();
        debug!(available = ?names, "probed providers");

        available
    }

    /// Case-insensitive lookup by name
    pub fn resolve(&self, name: &str) -> Result<&'a dyn Provider> {
        let wanted = name.trim();
        self.providers
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QuillError::ProviderNotFound {
                name: wanted.to_string(),
                valid: self.names(),
            })
    }
}
