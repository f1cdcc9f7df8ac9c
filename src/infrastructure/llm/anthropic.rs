use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::{HttpClientTrait, JsonResponse};
use crate::domain::{AiRequest, AiResponse, DomainError, Provider, ProviderConfig, ProviderKind, Usage};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages API provider
#[derive(Debug)]
pub struct AnthropicProvider<C: HttpClientTrait> {
    client: C,
    name: String,
    kind: ProviderKind,
    api_key: String,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> AnthropicProvider<C> {
    pub fn new(client: C, config: &ProviderConfig) -> Self {
        Self {
            client,
            name: config.name().to_string(),
            kind: config.kind.clone(),
            api_key: config.credential.trim().to_string(),
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    fn build_request(&self, request: &AiRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("x-api-key", self.api_key.as_str()),
            ("anthropic-version", ANTHROPIC_VERSION),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, response: JsonResponse) -> Result<AiResponse, DomainError> {
        let status = response.status;
        let reply: AnthropicResponse = serde_json::from_value(response.body).map_err(|e| {
            DomainError::api(status, format!("Failed to parse Anthropic response: {}", e))
        })?;

        let texts: Vec<String> = reply
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if texts.is_empty() {
            return Err(DomainError::api(status, "No text content in response"));
        }

        let mut ai_response =
            AiResponse::new(texts.join(""), reply.model.unwrap_or_else(|| self.model.clone()));

        if let Some(usage) = reply.usage {
            ai_response =
                ai_response.with_usage(Usage::new(usage.input_tokens, usage.output_tokens));
        }

        Ok(ai_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> Provider for AnthropicProvider<C> {
    async fn send(&self, request: &AiRequest) -> Result<AiResponse, DomainError> {
        if self.api_key.is_empty() {
            return Err(DomainError::not_configured(format!(
                "{} requires an API key",
                self.name
            )));
        }

        let url = self.messages_url();
        let body = self.build_request(request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &ProviderKind {
        &self.kind
    }
}

// Anthropic API types

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: Option<String>,
    content: Vec<AnthropicContentBlock>,
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
