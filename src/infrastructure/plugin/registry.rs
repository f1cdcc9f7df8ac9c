//! Plugin Registry
//!
//! Ordered plugin chain. Registration order is execution order for both the
//! pre-processing and post-processing folds.

use crate::domain::plugin::{Plugin, PluginCapability, PluginError, PluginMetadata};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Central registry for managing plugins
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: RwLock<Vec<Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    /// Create a new empty plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize `plugin` and append it to the chain
    ///
    /// A plugin that fails to initialize is not appended.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> Result<(), PluginError> {
        let metadata = plugin.metadata();

        if let Err(e) = plugin.initialize().await {
            error!(
                plugin_name = %metadata.name,
                error = %e,
                "Plugin initialization failed"
            );
            return Err(e);
        }

        info!(
            plugin_name = %metadata.name,
            plugin_version = %metadata.version,
            capabilities = ?plugin.capabilities(),
            "Registering plugin"
        );

        self.plugins.write().await.push(plugin);
        Ok(())
    }

    /// Run every pre-processor over `input`, stopping at the first failure
    pub async fn run_pre(&self, input: &str) -> Result<String, PluginError> {
        self.fold(input, PluginCapability::PreProcessor, |plugin, text| {
            plugin.pre_process(text)
        })
        .await
    }

    /// Run every post-processor over `output`, stopping at the first failure
    pub async fn run_post(&self, output: &str) -> Result<String, PluginError> {
        self.fold(output, PluginCapability::PostProcessor, |plugin, text| {
            plugin.post_process(text)
        })
        .await
    }

    async fn fold<F>(
        &self,
        input: &str,
        capability: PluginCapability,
        step: F,
    ) -> Result<String, PluginError>
    where
        F: Fn(&dyn Plugin, &str) -> Result<String, PluginError>,
    {
        let snapshot = self.snapshot().await;

        let mut text = input.to_string();
        for plugin in snapshot.iter().filter(|p| p.has_capability(capability)) {
            debug!(plugin_name = %plugin.metadata().name, %capability, "Running plugin");
            text = step(plugin.as_ref(), &text)?;
        }

        Ok(text)
    }

    async fn snapshot(&self) -> Vec<Arc<dyn Plugin>> {
        self.plugins.read().await.clone()
    }

    /// Metadata of all plugins in registration order
    pub async fn list_plugins(&self) -> Vec<PluginMetadata> {
        let plugins = self.plugins.read().await;
        plugins.iter().map(|p| p.metadata().clone()).collect()
    }

    /// First registered plugin with the given name
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.iter().find(|p| p.metadata().name == name).cloned()
    }

    pub async fn len(&self) -> usize {
        self.plugins.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plugins.read().await.is_empty()
    }
}
