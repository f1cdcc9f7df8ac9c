use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::{HttpClientTrait, JsonResponse};
use crate::domain::{AiRequest, AiResponse, DomainError, Provider, ProviderConfig, ProviderKind, Usage};

/// Ollama `/api/generate` provider
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    client: C,
    name: String,
    kind: ProviderKind,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(client: C, config: &ProviderConfig) -> Self {
        Self {
            client,
            name: config.name().to_string(),
            kind: config.kind.clone(),
            base_url: config.endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn build_request(&self, request: &AiRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "prompt": request.prompt,
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            },
        })
    }

    fn parse_response(&self, response: JsonResponse) -> Result<AiResponse, DomainError> {
        let status = response.status;
        let reply: OllamaResponse = serde_json::from_value(response.body).map_err(|e| {
            DomainError::api(status, format!("Failed to parse Ollama response: {}", e))
        })?;

        let mut ai_response =
            AiResponse::new(reply.response, reply.model.unwrap_or_else(|| self.model.clone()));

        if let (Some(prompt_tokens), Some(completion_tokens)) =
            (reply.prompt_eval_count, reply.eval_count)
        {
            ai_response = ai_response.with_usage(Usage::new(prompt_tokens, completion_tokens));
        }

        Ok(ai_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> Provider for OllamaProvider<C> {
    async fn send(&self, request: &AiRequest) -> Result<AiResponse, DomainError> {
        let url = self.generate_url();
        let body = self.build_request(request);
        let headers = vec![("Content-Type", "application/json")];

        let response = self.client.post_json(&url, headers, &body).await?;

        self.parse_response(response)
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &ProviderKind {
        &self.kind
    }
}

// Ollama API types

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    model: Option<String>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}
