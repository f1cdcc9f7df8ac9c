use async_trait::async_trait;

use crate::domain::{AiRequest, AiResponse, DomainError, Provider, ProviderConfig, ProviderKind, Usage};

/// Offline provider that answers every prompt with the same markdown template
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: String,
    kind: ProviderKind,
    model: String,
}

impl MockProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            name: config.name().to_string(),
            kind: config.kind.clone(),
            model: config.model().to_string(),
        }
    }

    /// Stand-in used when no provider is active
    pub fn fallback() -> Self {
        Self::new(&ProviderConfig::new(ProviderKind::Mock))
    }

    fn render(prompt: &str) -> String {
        format!(
            "# Mock AI Response\n\n\
             You asked: {prompt}\n\n\
             ## Code Example\n\n\
             ```rust\n\
             fn hello_world() {{\n    println!(\"Hello from Vibe Coder!\");\n}}\n\
             ```\n\n\
             ## Explanation\n\n\
             This is a mock response demonstrating the parsing capabilities."
        )
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn send(&self, request: &AiRequest) -> Result<AiResponse, DomainError> {
        let text = Self::render(&request.prompt);
        let usage = Usage::new(
            word_count(&request.prompt),
            word_count(&text),
        );

        Ok(AiResponse::new(text, self.model.clone()).with_usage(usage))
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &ProviderKind {
        &self.kind
    }
}

fn word_count(text: &str) -> u32 {
    u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX)
}
