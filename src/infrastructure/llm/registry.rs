//! Provider registry
//!
//! Ordered set of providers with at most one active entry. Indices are stable
//! for the lifetime of the registry since providers are only ever appended.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{MockProvider, ProviderFactory};
use crate::domain::{AiRequest, AiResponse, DomainError, Provider, ProviderConfig};

#[derive(Debug, Default)]
struct RegistryState {
    providers: Vec<Arc<dyn Provider>>,
    /// Always a valid index into `providers` when set
    active: Option<usize>,
}

/// Registry that routes requests to the active provider
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    state: RwLock<RegistryState>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider from `config` and append it
    pub async fn register(&self, config: &ProviderConfig) -> usize {
        self.register_provider(ProviderFactory::create(config)).await
    }

    /// Append an already constructed provider; the first one becomes active
    pub async fn register_provider(&self, provider: Arc<dyn Provider>) -> usize {
        let mut state = self.state.write().await;

        let index = state.providers.len();
        info!(
            index,
            provider = %provider.display_name(),
            kind = %provider.kind(),
            "Registering provider"
        );
        state.providers.push(provider);

        if state.active.is_none() {
            state.active = Some(index);
        }

        index
    }

    /// Display names in registration order
    pub async fn list(&self) -> Vec<String> {
        let state = self.state.read().await;
        state
            .providers
            .iter()
            .map(|provider| provider.display_name().to_string())
            .collect()
    }

    pub async fn active_index(&self) -> Option<usize> {
        self.state.read().await.active
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.providers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.providers.is_empty()
    }

    pub async fn set_active(&self, index: usize) -> Result<(), DomainError> {
        let mut state = self.state.write().await;

        let len = state.providers.len();
        if index >= len {
            return Err(DomainError::index(index, len));
        }

        state.active = Some(index);
        info!(
            index,
            provider = %state.providers[index].display_name(),
            "Active provider changed"
        );

        Ok(())
    }

    /// Send `request` to the active provider, or to a throwaway mock when
    /// nothing is registered
    pub async fn dispatch(&self, request: &AiRequest) -> Result<AiResponse, DomainError> {
        let provider = {
            let state = self.state.read().await;
            state
                .active
                .and_then(|index| state.providers.get(index))
                .cloned()
        };

        let provider: Arc<dyn Provider> = match provider {
            Some(provider) => provider,
            None => {
                debug!("No active provider, answering with mock");
                Arc::new(MockProvider::fallback())
            }
        };

        debug!(provider = %provider.display_name(), "Dispatching request");

        match request.timeout {
            Some(timeout) => tokio::time::timeout(timeout, provider.send(request))
                .await
                .map_err(|_| {
                    DomainError::network(format!(
                        "{} did not answer within {:?}",
                        provider.display_name(),
                        timeout
                    ))
                })?,
            None => provider.send(request).await,
        }
    }
}
