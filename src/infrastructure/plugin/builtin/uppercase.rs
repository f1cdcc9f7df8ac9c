//! Uppercase Plugin
//!
//! Pre-processor that upper-cases prompts.

use crate::domain::plugin::{Plugin, PluginCapability, PluginError, PluginMetadata};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

const CAPABILITIES: &[PluginCapability] = &[PluginCapability::PreProcessor];

#[derive(Debug)]
pub struct UppercasePlugin {
    metadata: PluginMetadata,
    ready: AtomicBool,
}

impl UppercasePlugin {
    pub fn new() -> Self {
        Self {
            metadata: PluginMetadata::new("Uppercase Converter", "0.1.0")
                .with_description("Converts input text to uppercase")
                .with_author("Vibe Coder Team"),
            ready: AtomicBool::new(false),
        }
    }
}

impl Default for UppercasePlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for UppercasePlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn capabilities(&self) -> &[PluginCapability] {
        CAPABILITIES
    }

    async fn initialize(&self) -> Result<(), PluginError> {
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn pre_process(&self, input: &str) -> Result<String, PluginError> {
        if !self.ready.load(Ordering::SeqCst) {
            return Err(PluginError::not_initialized(&self.metadata.name));
        }
        Ok(input.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uppercase_plugin() {
        let plugin = UppercasePlugin::new();
        plugin.initialize().await.unwrap();

        assert_eq!(plugin.pre_process("hello world").unwrap(), "HELLO WORLD");
    }

    #[test]
    fn test_refuses_before_initialize() {
        let plugin = UppercasePlugin::new();

        let result = plugin.pre_process("hello");

        assert!(matches!(result, Err(PluginError::NotInitialized { .. })));
    }

    #[test]
    fn test_declares_only_pre_processing() {
        let plugin = UppercasePlugin::new();

        assert!(plugin.has_capability(PluginCapability::PreProcessor));
        assert!(!plugin.has_capability(PluginCapability::PostProcessor));
    }
}
