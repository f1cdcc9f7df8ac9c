//! Plugin error types

use thiserror::Error;

/// Plugin-specific errors
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Plugin initialization failed for '{plugin_name}': {message}")]
    InitializationFailed {
        plugin_name: String,
        message: String,
    },

    #[error("Plugin '{plugin_name}' failed: {message}")]
    ProcessingFailed {
        plugin_name: String,
        message: String,
    },

    #[error("Plugin not initialized: {plugin_name}")]
    NotInitialized { plugin_name: String },
}

impl PluginError {
    pub fn initialization_failed(
        plugin_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InitializationFailed {
            plugin_name: plugin_name.into(),
            message: message.into(),
        }
    }

    pub fn processing_failed(plugin_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProcessingFailed {
            plugin_name: plugin_name.into(),
            message: message.into(),
        }
    }

    pub fn not_initialized(plugin_name: impl Into<String>) -> Self {
        Self::NotInitialized {
            plugin_name: plugin_name.into(),
        }
    }

    /// Name of the plugin that raised the error
    pub fn plugin_name(&self) -> &str {
        match self {
            Self::InitializationFailed { plugin_name, .. }
            | Self::ProcessingFailed { plugin_name, .. }
            | Self::NotInitialized { plugin_name } => plugin_name,
        }
    }
}
