//! Plugin entity types and core trait
//!
//! Defines the Plugin trait and associated metadata structures.

use super::error::PluginError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Descriptive plugin information; carries no behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Human-readable name, also used to look the plugin up
    pub name: String,

    /// Plugin version (semver format)
    pub version: String,

    /// Plugin description
    pub description: String,

    /// Author or maintainer
    pub author: String,
}

impl PluginMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            author: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

/// What a plugin is able to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginCapability {
    /// Transforms the prompt before dispatch
    PreProcessor,

    /// Transforms the reply after dispatch
    PostProcessor,

    /// Rewrites code blocks in replies
    CodeFormatter,

    /// Contributes a user command
    CustomCommand,
}

impl PluginCapability {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginCapability::PreProcessor => "pre_processor",
            PluginCapability::PostProcessor => "post_processor",
            PluginCapability::CodeFormatter => "code_formatter",
            PluginCapability::CustomCommand => "custom_command",
        }
    }
}

impl fmt::Display for PluginCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Core plugin trait that all plugins must implement
///
/// Transforms are synchronous; only initialization may suspend. The default
/// transforms are the identity, and the pipeline never calls a transform
/// whose capability the plugin does not declare.
#[async_trait]
pub trait Plugin: Send + Sync + Debug {
    /// Get plugin metadata
    fn metadata(&self) -> &PluginMetadata;

    /// Get the capabilities this plugin declares
    fn capabilities(&self) -> &[PluginCapability];

    /// Prepare the plugin for use; called once at registration
    async fn initialize(&self) -> Result<(), PluginError>;

    /// Process input before it is sent to a provider
    fn pre_process(&self, input: &str) -> Result<String, PluginError> {
        Ok(input.to_string())
    }

    /// Process a provider reply
    fn post_process(&self, output: &str) -> Result<String, PluginError> {
        Ok(output.to_string())
    }

    fn has_capability(&self, capability: PluginCapability) -> bool {
        self.capabilities().contains(&capability)
    }
}
