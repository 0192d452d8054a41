//! Wallet management and message signing.
//!
//! # Security
//! - Private keys are loaded from raw hex or the environment, never config files
//! - Keys are never logged or serialized
//! - `WalletRecord` carries only public material

use alloy::primitives::{Address, B256, Signature};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};

use crate::blockchain::types::{ClientError, ClientResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "WHISPER_PRIVATE_KEY";

/// Public view of a wallet. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletRecord {
    /// Checksummed account address.
    pub address: String,
    /// Uncompressed secp256k1 public key, hex encoded.
    pub public_key: String,
    /// Numeric chain ID the wallet signs for.
    pub chain_id: u64,
}

/// Wallet for transaction and message signing.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    ///
    /// # Security
    /// The private key is parsed and stored securely. It is never logged.
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> ClientResult<Self> {
        // Strip 0x prefix if present
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ClientError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Generate a wallet with a fresh random keypair.
    pub fn generate(chain_id: u64) -> Self {
        let signer = PrivateKeySigner::random();
        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet generated"
        );
        Self { signer, chain_id }
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `WHISPER_PRIVATE_KEY` from environment.
    pub fn from_env(chain_id: u64) -> ClientResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            ClientError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key, chain_id)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet is configured for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Uncompressed secp256k1 public key, hex encoded with 0x prefix.
    pub fn public_key_hex(&self) -> String {
        let point = self
            .signer
            .credential()
            .verifying_key()
            .to_encoded_point(false);
        format!("0x{}", hex::encode(point.as_bytes()))
    }

    /// Public view of this wallet.
    pub fn record(&self) -> WalletRecord {
        WalletRecord {
            address: self.address().to_string(),
            public_key: self.public_key_hex(),
            chain_id: self.chain_id,
        }
    }

    /// Borrow the underlying signer for transaction building.
    pub(crate) fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign a 32-byte hash.
    pub async fn sign_hash(&self, hash: B256) -> ClientResult<Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| ClientError::Wallet(format!("Signing failed: {}", e)))
    }

    /// Sign arbitrary message bytes (with Ethereum prefix).
    pub async fn sign_message(&self, message: &[u8]) -> ClientResult<Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| ClientError::Wallet(format!("Message signing failed: {}", e)))
    }
}
