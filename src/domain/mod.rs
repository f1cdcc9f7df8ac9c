//! Domain layer - Core types, traits and the reply parser

pub mod content;
pub mod error;
pub mod llm;
pub mod plugin;

pub use content::{parse_response, ContentBlock, ParsedResponse};
pub use error::DomainError;
pub use llm::{AiRequest, AiResponse, Provider, ProviderConfig, ProviderKind, Usage};
pub use plugin::{Plugin, PluginCapability, PluginError, PluginMetadata};
