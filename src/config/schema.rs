//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the SDK.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for the WhisperChain client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WhisperConfig {
    /// Chain key used when an operation does not name a chain.
    pub default_chain: String,

    /// Static map of chain key -> network descriptor.
    pub networks: BTreeMap<String, NetworkDescriptor>,

    /// RPC behaviour settings.
    pub rpc: RpcConfig,

    /// Encrypted messaging settings.
    pub messaging: MessagingConfig,

    /// Collectible contract settings.
    pub contract: ContractConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl WhisperConfig {
    /// Look up the descriptor for a chain key, falling back to the default
    /// chain when `chain` is `None`.
    pub fn network(&self, chain: Option<&str>) -> Option<(&str, &NetworkDescriptor)> {
        let key = chain.unwrap_or(&self.default_chain);
        self.networks
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Describes one configured blockchain network. Immutable once loaded.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkDescriptor {
    /// Human-readable network name (e.g. "Sepolia Testnet").
    pub name: String,

    /// Numeric EVM chain ID, used for EIP-155 signing.
    pub chain_id: u64,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Block explorer base URL, if the network has one.
    pub explorer_url: Option<String>,

    /// Ticker symbol of the native token.
    pub native_symbol: String,
}

impl Default for NetworkDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            chain_id: 0,
            rpc_url: "http://localhost:8545".to_string(),
            explorer_url: None,
            native_symbol: "ETH".to_string(),
        }
    }
}

/// RPC behaviour configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// RPC request timeout in seconds.
    pub timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            confirmation_blocks: 3,
            poll_interval_ms: 2000,
        }
    }
}

/// Encrypted messaging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Maximum plaintext size accepted for encryption, in bytes.
    pub max_plaintext_bytes: usize,

    /// Default message time-to-live in seconds (0 = never expires).
    pub default_ttl_secs: u64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            max_plaintext_bytes: 512,
            default_ttl_secs: 0,
        }
    }
}

/// Collectible contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    /// Deployed collectible contract address per chain key.
    pub addresses: BTreeMap<String, String>,
}

impl ContractConfig {
    /// Contract address configured for a chain key, if any.
    pub fn address_for(&self, chain: &str) -> Option<&str> {
        self.addresses.get(chain).map(String::as_str)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WhisperConfig::default();
        assert!(config.networks.is_empty());
        assert_eq!(config.rpc.timeout_secs, 10);
        assert_eq!(config.rpc.confirmation_blocks, 3);
        assert_eq!(config.messaging.max_plaintext_bytes, 512);
        assert_eq!(config.messaging.default_ttl_secs, 0);
    }

    #[test]
    fn test_network_lookup_falls_back_to_default_chain() {
        let mut config = WhisperConfig {
            default_chain: "local".to_string(),
            ..Default::default()
        };
        config.networks.insert(
            "local".to_string(),
            NetworkDescriptor {
                name: "Local Devnet".to_string(),
                chain_id: 31337,
                ..Default::default()
            },
        );

        let (key, descriptor) = config.network(None).unwrap();
        assert_eq!(key, "local");
        assert_eq!(descriptor.chain_id, 31337);

        assert!(config.network(Some("mainnet")).is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_src = r#"
            default_chain = "sepolia"

            [networks.sepolia]
            name = "Sepolia Testnet"
            chain_id = 11155111
            rpc_url = "https://rpc.sepolia.org"
            explorer_url = "https://sepolia.etherscan.io"
        "#;

        let config: WhisperConfig = toml::from_str(toml_src).unwrap();
        let descriptor = &config.networks["sepolia"];
        assert_eq!(descriptor.chain_id, 11155111);
        assert_eq!(descriptor.native_symbol, "ETH");
        assert_eq!(
            descriptor.explorer_url.as_deref(),
            Some("https://sepolia.etherscan.io")
        );
    }
}
