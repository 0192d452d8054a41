//! Lazy provider registry.
//!
//! # Responsibilities
//! - Construct one RPC connection handle per configured chain, on first use
//! - Hand out the cached handle on every subsequent call
//!
//! # Design Decisions
//! - No expiry and no health checks: a handle lives as long as the registry
//! - The cache map is the registry's only mutable state, written during lazy
//!   initialization; concurrent first calls race benignly (first insert wins)

use alloy::providers::{Provider, ProviderBuilder};
use dashmap::DashMap;
use std::sync::Arc;

use crate::blockchain::types::{ClientError, ClientResult};
use crate::config::schema::{NetworkDescriptor, WhisperConfig};

/// A shared connection handle to one chain's RPC endpoint.
pub type ProviderHandle = Arc<dyn Provider + Send + Sync>;

/// Creates and caches one provider handle per chain key.
#[derive(Clone)]
pub struct ProviderRegistry {
    config: Arc<WhisperConfig>,
    providers: Arc<DashMap<String, ProviderHandle>>,
}

impl ProviderRegistry {
    /// Create an empty registry over a validated configuration.
    pub fn new(config: Arc<WhisperConfig>) -> Self {
        Self {
            config,
            providers: Arc::new(DashMap::new()),
        }
    }

    /// The configuration this registry resolves chains against.
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }

    /// Resolve a chain key (default chain when `None`) to its descriptor.
    pub fn descriptor(&self, chain: Option<&str>) -> ClientResult<(&str, &NetworkDescriptor)> {
        self.config.network(chain).ok_or_else(|| {
            ClientError::UnknownChain(
                chain.unwrap_or(&self.config.default_chain).to_string(),
            )
        })
    }

    /// Get the provider handle for a chain, creating it on first use.
    ///
    /// Two consecutive calls with the same chain key return the identical
    /// cached handle.
    pub fn get_provider(&self, chain: Option<&str>) -> ClientResult<ProviderHandle> {
        let (key, descriptor) = self.descriptor(chain)?;

        if let Some(handle) = self.providers.get(key) {
            return Ok(handle.clone());
        }

        let url: url::Url = descriptor.rpc_url.parse().map_err(|e| {
            ClientError::Rpc(format!("Invalid RPC URL '{}': {}", descriptor.rpc_url, e))
        })?;

        let handle: ProviderHandle = Arc::new(ProviderBuilder::new().connect_http(url));

        tracing::info!(
            chain = key,
            chain_id = descriptor.chain_id,
            rpc_url = %descriptor.rpc_url,
            "Provider created"
        );

        // First insert wins if two callers raced here.
        let entry = self
            .providers
            .entry(key.to_string())
            .or_insert(handle);
        Ok(entry.clone())
    }

    /// Number of chains with a live handle.
    pub fn connected_count(&self) -> usize {
        self.providers.len()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("default_chain", &self.config.default_chain)
            .field("connected", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NetworkDescriptor;

    fn test_config() -> Arc<WhisperConfig> {
        let mut config = WhisperConfig {
            default_chain: "local".to_string(),
            ..Default::default()
        };
        config.networks.insert(
            "local".to_string(),
            NetworkDescriptor {
                name: "Local Devnet".to_string(),
                chain_id: 31337,
                rpc_url: "http://localhost:8545".to_string(),
                ..Default::default()
            },
        );
        config.networks.insert(
            "sepolia".to_string(),
            NetworkDescriptor {
                name: "Sepolia Testnet".to_string(),
                chain_id: 11155111,
                rpc_url: "https://rpc.sepolia.org".to_string(),
                ..Default::default()
            },
        );
        Arc::new(config)
    }

    #[test]
    fn test_same_chain_returns_identical_handle() {
        let registry = ProviderRegistry::new(test_config());

        let first = registry.get_provider(Some("local")).unwrap();
        let second = registry.get_provider(Some("local")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.connected_count(), 1);
    }

    #[test]
    fn test_distinct_chains_get_distinct_handles() {
        let registry = ProviderRegistry::new(test_config());

        let local = registry.get_provider(Some("local")).unwrap();
        let sepolia = registry.get_provider(Some("sepolia")).unwrap();
        assert!(!Arc::ptr_eq(&local, &sepolia));
        assert_eq!(registry.connected_count(), 2);
    }

    #[test]
    fn test_none_resolves_default_chain() {
        let registry = ProviderRegistry::new(test_config());

        let by_default = registry.get_provider(None).unwrap();
        let by_name = registry.get_provider(Some("local")).unwrap();
        assert!(Arc::ptr_eq(&by_default, &by_name));
    }

    #[test]
    fn test_unknown_chain_is_rejected() {
        let registry = ProviderRegistry::new(test_config());

        let err = registry.get_provider(Some("mumbai")).err().unwrap();
        assert!(matches!(err, ClientError::UnknownChain(ref c) if c == "mumbai"));
        assert_eq!(registry.connected_count(), 0);
    }
}
