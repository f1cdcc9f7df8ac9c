use async_trait::async_trait;
use std::fmt::Debug;

use super::{AiRequest, AiResponse, ProviderKind};
use crate::domain::DomainError;

/// Trait for backends that answer prompts (Ollama, OpenAI, mock, ...)
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Send a prompt and wait for the complete reply
    async fn send(&self, request: &AiRequest) -> Result<AiResponse, DomainError>;

    /// Name shown to users when listing providers
    fn display_name(&self) -> &str;

    /// Backend family this provider was built for
    fn kind(&self) -> &ProviderKind;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Provider with a canned outcome that records every prompt it receives
    #[derive(Debug)]
    pub struct ScriptedProvider {
        name: String,
        kind: ProviderKind,
        reply: Option<String>,
        error: Option<(u16, String)>,
        delay: Option<Duration>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                kind: ProviderKind::Mock,
                reply: None,
                error: None,
                delay: None,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
            self.reply = Some(reply.into());
            self
        }

        pub fn with_api_error(mut self, status: u16, body: impl Into<String>) -> Self {
            self.error = Some((status, body.into()));
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn send(&self, request: &AiRequest) -> Result<AiResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(request.prompt.clone());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if let Some((status, ref body)) = self.error {
                return Err(DomainError::api(status, body.clone()));
            }

            let text = self
                .reply
                .clone()
                .unwrap_or_else(|| format!("{} says: {}", self.name, request.prompt));

            Ok(AiResponse::new(text, "scripted-model"))
        }

        fn display_name(&self) -> &str {
            &self.name
        }

        fn kind(&self) -> &ProviderKind {
            &self.kind
        }
    }
}
