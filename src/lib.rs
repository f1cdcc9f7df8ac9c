//! vibe-coder
//!
//! Prompt pipeline for AI coding assistants:
//! - Multiple interchangeable providers (Ollama, OpenAI, Anthropic, mock)
//! - Ordered pre- and post-processing plugins
//! - Parsing of markdown replies into typed content blocks

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use domain::DomainError;
use infrastructure::plugin::builtin_plugins;
use infrastructure::services::Orchestrator;
use tracing::info;

/// Build an orchestrator with the providers and plugins named in `config`
pub async fn create_orchestrator(config: &AppConfig) -> Result<Orchestrator, DomainError> {
    let orchestrator = Orchestrator::new().with_defaults(config.request.defaults());

    for provider in config.resolved_providers() {
        orchestrator.register_provider(&provider).await;
    }

    for plugin in builtin_plugins(&config.plugins) {
        orchestrator.register_plugin(plugin).await?;
    }

    if let Some(index) = config.active_provider {
        orchestrator.set_active_provider(index).await?;
    }

    info!(
        providers = orchestrator.list_providers().await.len(),
        plugins = orchestrator.list_plugins().await.len(),
        "Orchestrator ready"
    );

    Ok(orchestrator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProviderConfig, ProviderKind};
    use crate::infrastructure::plugin::PluginSettings;

    #[tokio::test]
    async fn test_create_orchestrator_from_config() {
        let config = AppConfig {
            providers: vec![
                ProviderConfig::new(ProviderKind::Mock),
                ProviderConfig::new(ProviderKind::Mock).with_display_name("Second"),
            ],
            active_provider: Some(1),
            plugins: PluginSettings {
                uppercase: true,
                code_formatter: false,
            },
            ..AppConfig::default()
        };

        let orchestrator = create_orchestrator(&config).await.unwrap();

        assert_eq!(orchestrator.list_providers().await, vec!["Mock", "Second"]);
        assert_eq!(orchestrator.active_provider().await, Some(1));

        let reply = orchestrator.send_prompt("quiet please").await.unwrap();
        assert!(reply.contains("You asked: QUIET PLEASE"));
    }

    #[tokio::test]
    async fn test_invalid_active_provider_is_rejected() {
        let config = AppConfig {
            providers: vec![ProviderConfig::new(ProviderKind::Mock)],
            active_provider: Some(3),
            ..AppConfig::default()
        };

        let result = create_orchestrator(&config).await;

        assert!(matches!(result, Err(DomainError::Index { index: 3, len: 1 })));
    }

    #[tokio::test]
    async fn test_missing_credential_reports_not_configured() {
        let config = AppConfig {
            providers: vec![
                ProviderConfig::new(ProviderKind::OpenAi)
                    .with_credential("${VIBE_CODER_TEST_UNSET_KEY}"),
            ],
            ..AppConfig::default()
        };

        let orchestrator = create_orchestrator(&config).await.unwrap();
        let result = orchestrator.send_prompt("hi").await;

        assert!(matches!(result, Err(DomainError::NotConfigured { .. })));
    }
}
