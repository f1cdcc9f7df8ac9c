//! Provider domain models and traits

mod config;
mod provider;
mod request;
mod response;

pub use config::{ProviderConfig, ProviderKind};
pub use provider::Provider;
pub use request::{AiRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use response::{AiResponse, Usage};

#[cfg(test)]
pub use provider::mock::ScriptedProvider;
