//! Orchestrator - prompt pipeline from user input to parsed reply

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::llm::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::domain::{
    parse_response, AiRequest, DomainError, ParsedResponse, Plugin, PluginMetadata, Provider,
    ProviderConfig,
};
use crate::infrastructure::llm::ProviderRegistry;
use crate::infrastructure::plugin::PluginRegistry;

/// Generation parameters applied to every prompt
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefaults {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Option<Duration>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
        }
    }
}

impl RequestDefaults {
    fn request(&self, prompt: String) -> AiRequest {
        let request = AiRequest::new(prompt)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        match self.timeout {
            Some(timeout) => request.with_timeout(timeout),
            None => request,
        }
    }
}

/// Composes the plugin chains, the provider registry and the parser
#[derive(Debug, Default)]
pub struct Orchestrator {
    providers: ProviderRegistry,
    plugins: PluginRegistry,
    defaults: RequestDefaults,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self, defaults: RequestDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Register a provider built from `config`; returns its index
    pub async fn register_provider(&self, config: &ProviderConfig) -> usize {
        self.providers.register(config).await
    }

    /// Register an already constructed provider; returns its index
    pub async fn register_provider_instance(&self, provider: Arc<dyn Provider>) -> usize {
        self.providers.register_provider(provider).await
    }

    pub async fn register_plugin(&self, plugin: Arc<dyn Plugin>) -> Result<(), DomainError> {
        self.plugins.register(plugin).await?;
        Ok(())
    }

    pub async fn list_providers(&self) -> Vec<String> {
        self.providers.list().await
    }

    pub async fn active_provider(&self) -> Option<usize> {
        self.providers.active_index().await
    }

    #[instrument(skip(self))]
    pub async fn set_active_provider(&self, index: usize) -> Result<(), DomainError> {
        self.providers.set_active(index).await
    }

    pub async fn list_plugins(&self) -> Vec<PluginMetadata> {
        self.plugins.list_plugins().await
    }

    /// Run `prompt` through pre-processing, dispatch and post-processing
    ///
    /// The first error from any stage is returned unchanged.
    #[instrument(skip(self, prompt), fields(request_id = %Uuid::new_v4()))]
    pub async fn send_prompt(&self, prompt: &str) -> Result<String, DomainError> {
        let processed = self.plugins.run_pre(prompt).await?;
        debug!(prompt_len = processed.len(), "Prompt pre-processed");

        let response = self.providers.dispatch(&self.defaults.request(processed)).await?;
        info!(
            model = %response.model,
            reply_len = response.text.len(),
            "Provider replied"
        );

        let output = self.plugins.run_post(&response.text).await?;
        Ok(output)
    }

    pub fn parse_response(&self, text: &str) -> ParsedResponse {
        parse_response(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::ScriptedProvider;
    use crate::domain::{ContentBlock, PluginError, ProviderKind};
    use crate::infrastructure::plugin::registry::mock::RecordingPlugin;
    use crate::infrastructure::plugin::{CodeFormatterPlugin, UppercasePlugin};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_prompt_runs_full_pipeline() {
        let orchestrator = Orchestrator::new();
        let provider = Arc::new(ScriptedProvider::new("echo"));
        orchestrator.register_provider_instance(provider.clone()).await;
        orchestrator
            .register_plugin(Arc::new(UppercasePlugin::new()))
            .await
            .unwrap();
        orchestrator
            .register_plugin(Arc::new(RecordingPlugin::post("tail")))
            .await
            .unwrap();

        let output = orchestrator.send_prompt("hello").await.unwrap();

        assert_eq!(provider.prompts(), vec!["HELLO"]);
        assert_eq!(output, "echo says: HELLO[tail]");
    }

    #[tokio::test]
    async fn test_send_prompt_without_providers_uses_mock() {
        let orchestrator = Orchestrator::new();

        let output = orchestrator.send_prompt("hi").await.unwrap();
        let parsed = orchestrator.parse_response(&output);

        assert!(matches!(
            parsed.iter().next(),
            Some(ContentBlock::Title { level: 1, text }) if text == "Mock AI Response"
        ));
    }

    #[tokio::test]
    async fn test_pre_processing_failure_skips_dispatch() {
        let orchestrator = Orchestrator::new();
        let provider = Arc::new(ScriptedProvider::new("echo"));
        orchestrator.register_provider_instance(provider.clone()).await;
        orchestrator
            .register_plugin(Arc::new(RecordingPlugin::pre("gate").failing()))
            .await
            .unwrap();

        let result = orchestrator.send_prompt("hello").await;

        assert!(matches!(
            result,
            Err(DomainError::Plugin(PluginError::ProcessingFailed { .. }))
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_skips_post_processing() {
        let orchestrator = Orchestrator::new();
        let post = Arc::new(RecordingPlugin::post("after"));
        orchestrator
            .register_provider_instance(Arc::new(
                ScriptedProvider::new("down").with_api_error(502, "bad gateway"),
            ))
            .await;
        orchestrator.register_plugin(post.clone()).await.unwrap();

        let result = orchestrator.send_prompt("hello").await;

        assert!(matches!(result, Err(DomainError::Api { status: 502, .. })));
        assert!(post.seen().is_empty());
    }

    #[tokio::test]
    async fn test_switching_active_provider() {
        let orchestrator = Orchestrator::new();
        orchestrator
            .register_provider_instance(Arc::new(ScriptedProvider::new("first")))
            .await;
        orchestrator
            .register_provider_instance(Arc::new(ScriptedProvider::new("second")))
            .await;

        assert_eq!(orchestrator.list_providers().await, vec!["first", "second"]);
        assert_eq!(orchestrator.active_provider().await, Some(0));

        orchestrator.set_active_provider(1).await.unwrap();
        assert_eq!(orchestrator.send_prompt("x").await.unwrap(), "second says: x");

        let result = orchestrator.set_active_provider(5).await;
        assert!(matches!(result, Err(DomainError::Index { index: 5, len: 2 })));
        assert_eq!(orchestrator.active_provider().await, Some(1));
    }

    #[tokio::test]
    async fn test_defaults_reach_the_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let orchestrator = Orchestrator::new().with_defaults(RequestDefaults {
            temperature: 0.2,
            max_tokens: 128,
            timeout: Some(Duration::from_secs(5)),
        });
        orchestrator
            .register_provider(&ProviderConfig::new(ProviderKind::Ollama).with_endpoint(server.uri()))
            .await;

        assert_eq!(orchestrator.send_prompt("hi").await.unwrap(), "ok");

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["options"]["num_predict"], 128);
        assert_eq!(body["prompt"], "hi");
    }

    #[tokio::test]
    async fn test_server_error_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server busy"))
            .mount(&server)
            .await;

        let orchestrator = Orchestrator::new();
        orchestrator
            .register_provider(&ProviderConfig::new(ProviderKind::Ollama).with_endpoint(server.uri()))
            .await;

        let result = orchestrator.send_prompt("hello").await;

        match result {
            Err(DomainError::Api { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "server busy");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_code_formatter_output_parses() {
        let orchestrator = Orchestrator::new();
        orchestrator
            .register_plugin(Arc::new(CodeFormatterPlugin::new()))
            .await
            .unwrap();

        let output = orchestrator.send_prompt("show code").await.unwrap();
        let parsed = orchestrator.parse_response(&output);

        let (language, code) = parsed.code_blocks()[0];
        assert_eq!(language, Some("rust"));
        assert!(code.starts_with("// Formatted by Code Formatter Plugin\nfn hello_world()"));
        assert_eq!(orchestrator.list_plugins().await[0].name, "Code Formatter");
    }
}
