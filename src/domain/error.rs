use thiserror::Error;

use super::plugin::PluginError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Provider not configured: {message}")]
    NotConfigured { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Provider index {index} out of range ({len} registered)")]
    Index { index: usize, len: usize },

    #[error(transparent)]
    Plugin(#[from] PluginError),
}

impl DomainError {
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn index(index: usize, len: usize) -> Self {
        Self::Index { index, len }
    }

    /// Stable tag for surfacing the error category to users
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured { .. } => "not_configured",
            Self::Network { .. } => "network_error",
            Self::Api { .. } => "api_error",
            Self::Index { .. } => "index_error",
            Self::Plugin(_) => "plugin_error",
        }
    }
}
