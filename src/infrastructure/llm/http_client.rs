use async_trait::async_trait;

use crate::domain::DomainError;

/// Successful JSON reply with the status it arrived with
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl JsonResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }
}

/// Trait for HTTP client operations (for mocking)
///
/// Implementations classify failures: no response is a `Network` error, a
/// non-2xx status is an `Api` error carrying the raw body, and a 2xx body that
/// is not JSON is an `Api` error describing the violation.
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<JsonResponse, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<JsonResponse, DomainError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DomainError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(DomainError::api(status.as_u16(), text));
        }

        let body = serde_json::from_str(&text).map_err(|e| {
            DomainError::api(status.as_u16(), format!("Malformed response body: {}", e))
        })?;

        Ok(JsonResponse {
            status: status.as_u16(),
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(header("x-test", "yes"))
            .and(body_json(serde_json::json!({"prompt": "hi"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"response": "hello"})),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let url = format!("{}/api/generate", server.uri());
        let response = client
            .post_json(&url, vec![("x-test", "yes")], &serde_json::json!({"prompt": "hi"}))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body["response"], "hello");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error_with_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server busy"))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let result = client
            .post_json(&server.uri(), vec![], &serde_json::json!({}))
            .await;

        match result {
            Err(DomainError::Api { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "server busy");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let result = client
            .post_json(&server.uri(), vec![], &serde_json::json!({}))
            .await;

        match result {
            Err(DomainError::Api { status, body }) => {
                assert_eq!(status, 200);
                assert!(body.starts_with("Malformed response body"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = HttpClient::new();
        let result = client
            .post_json("http://127.0.0.1:1/api/generate", vec![], &serde_json::json!({}))
            .await;

        assert!(matches!(result, Err(DomainError::Network { .. })));
    }
}
