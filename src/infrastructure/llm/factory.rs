use std::sync::Arc;

use tracing::warn;

use super::http_client::{HttpClient, HttpClientTrait};
use super::{AnthropicProvider, MockProvider, OllamaProvider, OpenAiProvider};
use crate::domain::{Provider, ProviderConfig, ProviderKind};

/// Factory for creating providers from configuration
#[derive(Debug)]
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider backed by the real HTTP client
    pub fn create(config: &ProviderConfig) -> Arc<dyn Provider> {
        Self::create_with_client(config, HttpClient::new())
    }

    /// Create a provider on top of the given HTTP client
    ///
    /// Never fails: unrecognized kinds become a [`MockProvider`] that keeps the
    /// configured name and kind tag.
    pub fn create_with_client<C>(config: &ProviderConfig, client: C) -> Arc<dyn Provider>
    where
        C: HttpClientTrait + 'static,
    {
        if config.kind.requires_credential() && config.credential.trim().is_empty() {
            warn!(
                provider = %config.name(),
                kind = %config.kind,
                "Provider has no credential; requests will fail until one is configured"
            );
        }

        match &config.kind {
            ProviderKind::Mock => Arc::new(MockProvider::new(config)),
            ProviderKind::Ollama => Arc::new(OllamaProvider::new(client, config)),
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(client, config)),
            ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(client, config)),
            ProviderKind::Unknown(raw) => {
                warn!(
                    kind = %raw,
                    provider = %config.name(),
                    "Unknown provider kind, falling back to mock"
                );
                Arc::new(MockProvider::new(config))
            }
        }
    }
}
