use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::{HttpClientTrait, JsonResponse};
use crate::domain::{AiRequest, AiResponse, DomainError, Provider, ProviderConfig, ProviderKind, Usage};

/// OpenAI-compatible chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider<C: HttpClientTrait> {
    client: C,
    name: String,
    kind: ProviderKind,
    api_key: String,
    auth_header: String,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OpenAiProvider<C> {
    pub fn new(client: C, config: &ProviderConfig) -> Self {
        let api_key = config.credential.trim().to_string();
        let auth_header = format!("Bearer {}", api_key);

        Self {
            client,
            name: config.name().to_string(),
            kind: config.kind.clone(),
            api_key,
            auth_header,
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, request: &AiRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": request.prompt }
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": false,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, response: JsonResponse) -> Result<AiResponse, DomainError> {
        let status = response.status;
        let reply: OpenAiResponse = serde_json::from_value(response.body).map_err(|e| {
            DomainError::api(status, format!("Failed to parse OpenAI response: {}", e))
        })?;

        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::api(status, "No choices in response"))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| DomainError::api(status, "No content in response"))?;

        let mut ai_response =
            AiResponse::new(content, reply.model.unwrap_or_else(|| self.model.clone()));

        if let Some(usage) = reply.usage {
            ai_response =
                ai_response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(ai_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> Provider for OpenAiProvider<C> {
    async fn send(&self, request: &AiRequest) -> Result<AiResponse, DomainError> {
        if self.api_key.is_empty() {
            return Err(DomainError::not_configured(format!(
                "{} requires an API key",
                self.name
            )));
        }

        let url = self.chat_completions_url();
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

// OpenAI API types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    model: Option<String>,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
