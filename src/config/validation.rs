//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default chain names a configured network)
//! - Validate value ranges (timeouts > 0, chain IDs nonzero and unique)
//! - Validate textual formats (RPC URLs, contract addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WhisperConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::BTreeMap;

use crate::blockchain::address::is_valid_address;
use crate::config::schema::WhisperConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Config field the error refers to.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &WhisperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.networks.is_empty() {
        errors.push(ValidationError {
            field: "networks".to_string(),
            message: "at least one network must be configured".to_string(),
        });
    }

    if !config.networks.contains_key(&config.default_chain) {
        errors.push(ValidationError {
            field: "default_chain".to_string(),
            message: format!("'{}' is not a configured network", config.default_chain),
        });
    }

    let mut seen_chain_ids: BTreeMap<u64, &str> = BTreeMap::new();
    for (key, descriptor) in &config.networks {
        let field = |suffix: &str| format!("networks.{}.{}", key, suffix);

        if descriptor.chain_id == 0 {
            errors.push(ValidationError {
                field: field("chain_id"),
                message: "chain ID must be nonzero".to_string(),
            });
        } else if let Some(other) = seen_chain_ids.insert(descriptor.chain_id, key) {
            errors.push(ValidationError {
                field: field("chain_id"),
                message: format!("chain ID {} already used by '{}'", descriptor.chain_id, other),
            });
        }

        match url::Url::parse(&descriptor.rpc_url) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https" | "ws" | "wss") {
                    errors.push(ValidationError {
                        field: field("rpc_url"),
                        message: format!("unsupported URL scheme '{}'", parsed.scheme()),
                    });
                }
            }
            Err(e) => errors.push(ValidationError {
                field: field("rpc_url"),
                message: format!("invalid URL: {}", e),
            }),
        }
    }

    for (chain, address) in &config.contract.addresses {
        if !is_valid_address(address) {
            errors.push(ValidationError {
                field: format!("contract.addresses.{}", chain),
                message: format!("'{}' is not a valid contract address", address),
            });
        }
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "rpc.timeout_secs".to_string(),
            message: "timeout must be nonzero".to_string(),
        });
    }
    if config.rpc.poll_interval_ms == 0 {
        errors.push(ValidationError {
            field: "rpc.poll_interval_ms".to_string(),
            message: "poll interval must be nonzero".to_string(),
        });
    }
    if config.messaging.max_plaintext_bytes == 0 {
        errors.push(ValidationError {
            field: "messaging.max_plaintext_bytes".to_string(),
            message: "plaintext limit must be nonzero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NetworkDescriptor;

    fn valid_config() -> WhisperConfig {
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
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_config_collects_all_errors() {
        let errors = validate_config(&WhisperConfig::default()).unwrap_err();
        // Missing networks AND an unknown default chain.
        assert!(errors.len() >= 2);
        assert!(errors.iter().any(|e| e.field == "networks"));
        assert!(errors.iter().any(|e| e.field == "default_chain"));
    }

    #[test]
    fn test_rejects_zero_and_duplicate_chain_ids() {
        let mut config = valid_config();
        config.networks.insert(
            "zero".to_string(),
            NetworkDescriptor {
                chain_id: 0,
                ..Default::default()
            },
        );
        config.networks.insert(
            "dup".to_string(),
            NetworkDescriptor {
                chain_id: 31337,
                ..Default::default()
            },
        );

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "networks.zero.chain_id"));
        assert!(errors.iter().any(|e| e.field == "networks.dup.chain_id"));
    }

    #[test]
    fn test_rejects_bad_rpc_url_scheme() {
        let mut config = valid_config();
        config.networks.get_mut("local").unwrap().rpc_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unsupported URL scheme"));
    }

    #[test]
    fn test_rejects_malformed_contract_address() {
        let mut config = valid_config();
        config
            .contract
            .addresses
            .insert("local".to_string(), "0x1234".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "contract.addresses.local");
    }
}
