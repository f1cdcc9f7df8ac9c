//! Provider implementations and the registry that routes between them

mod anthropic;
mod factory;
mod http_client;
mod mock;
mod ollama;
mod openai;
mod registry;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait, JsonResponse};
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use registry::ProviderRegistry;
