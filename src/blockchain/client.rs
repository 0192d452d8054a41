//! Blockchain facade with timeout and error handling.
//!
//! # Responsibilities
//! - Resolve a chain key to its cached provider handle
//! - Query chain state (balances, block number, gas price, receipts)
//! - Submit signed value transfers
//! - Normalize raw replies into `TransactionRecord` values
//!
//! Each operation issues one logical RPC interaction and reflects the
//! network's view at call time. There is no caching of chain state, no
//! batching, and no retry; failures propagate to the caller.

use alloy::consensus::Transaction as _;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::{Address, Signature, TxHash};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::transaction::{unix_now, TransactionRecord, TxStatus};
use crate::blockchain::types::{ClientError, ClientResult};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::WhisperConfig;
use crate::network::registry::ProviderRegistry;

/// Gas limit for a plain native-token transfer.
const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Thin facade over the configured chains' JSON-RPC endpoints.
#[derive(Debug, Clone)]
pub struct BlockchainClient {
    registry: ProviderRegistry,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a facade over a validated configuration.
    pub fn new(config: Arc<WhisperConfig>) -> Self {
        let timeout_duration = Duration::from_secs(config.rpc.timeout_secs);
        Self {
            registry: ProviderRegistry::new(config),
            timeout_duration,
        }
    }

    /// The provider registry backing this facade.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// The loaded configuration.
    pub fn config(&self) -> &WhisperConfig {
        self.registry.config()
    }

    /// Run one RPC future under the configured timeout.
    async fn rpc_call<T, E, F>(&self, fut: F) -> ClientResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ClientError::Rpc(e.to_string())),
            Err(_) => Err(ClientError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the native balance of an address as a decimal string.
    pub async fn get_balance(&self, address: &str, chain: Option<&str>) -> ClientResult<String> {
        let provider = self.registry.get_provider(chain)?;
        let account: Address = address
            .parse()
            .map_err(|e| ClientError::Validation(format!("Invalid address '{}': {}", address, e)))?;

        let wei = self.rpc_call(provider.get_balance(account)).await?;
        Ok(format_ether(wei))
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self, chain: Option<&str>) -> ClientResult<u64> {
        let provider = self.registry.get_provider(chain)?;
        self.rpc_call(provider.get_block_number()).await
    }

    /// Get the current gas price in wei.
    pub async fn get_gas_price(&self, chain: Option<&str>) -> ClientResult<u128> {
        let provider = self.registry.get_provider(chain)?;
        self.rpc_call(provider.get_gas_price()).await
    }

    /// Sign and submit a native-token transfer.
    ///
    /// Returns a `TransactionRecord` with status `Pending`. Submission is an
    /// irreversible on-chain side effect; network errors propagate without
    /// retry.
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `amount` - Decimal amount in the native unit (e.g. "0.25")
    /// * `private_key` - Sender's hex private key (with or without 0x prefix)
    pub async fn send_transaction(
        &self,
        to: &str,
        amount: &str,
        private_key: &str,
        chain: Option<&str>,
    ) -> ClientResult<TransactionRecord> {
        let (key, descriptor) = self.registry.descriptor(chain)?;
        let chain_id = descriptor.chain_id;
        let key = key.to_string();
        let provider = self.registry.get_provider(chain)?;

        let recipient: Address = to
            .parse()
            .map_err(|e| ClientError::Validation(format!("Invalid recipient '{}': {}", to, e)))?;
        let value = parse_ether(amount)
            .map_err(|e| ClientError::Validation(format!("Invalid amount '{}': {}", amount, e)))?;

        let wallet = Wallet::from_private_key(private_key, chain_id)?;
        let sender = wallet.address();

        let nonce = self.rpc_call(provider.get_transaction_count(sender)).await?;
        let gas_price = self.rpc_call(provider.get_gas_price()).await?;

        let request = TransactionRequest::default()
            .with_to(recipient)
            .with_value(value)
            .with_nonce(nonce)
            .with_chain_id(chain_id)
            .with_gas_price(gas_price)
            .with_gas_limit(TRANSFER_GAS_LIMIT);

        let signer = EthereumWallet::from(wallet.signer().clone());
        let envelope = request
            .build(&signer)
            .await
            .map_err(|e| ClientError::Wallet(format!("Failed to sign transaction: {}", e)))?;

        let pending = self
            .rpc_call(provider.send_raw_transaction(&envelope.encoded_2718()))
            .await?;
        let hash = *pending.tx_hash();

        tracing::info!(
            chain = %key,
            tx_hash = %hash,
            from = %sender,
            to = %recipient,
            value = %amount,
            "Transaction submitted"
        );

        Ok(TransactionRecord::pending(
            hash.to_string(),
            sender.to_string(),
            recipient.to_string(),
            amount.to_string(),
        ))
    }

    /// Look up a transaction by hash.
    ///
    /// Returns `None` when the node does not know the hash. Status is
    /// `Confirmed` only when the receipt reports success, `Failed` on a
    /// revert, and `Pending` while no receipt exists.
    pub async fn get_transaction(
        &self,
        hash: &str,
        chain: Option<&str>,
    ) -> ClientResult<Option<TransactionRecord>> {
        let provider = self.registry.get_provider(chain)?;
        let tx_hash: TxHash = hash
            .parse()
            .map_err(|e| ClientError::Validation(format!("Invalid tx hash '{}': {}", hash, e)))?;

        let Some(tx) = self
            .rpc_call(provider.get_transaction_by_hash(tx_hash))
            .await?
        else {
            return Ok(None);
        };

        let receipt = self
            .rpc_call(provider.get_transaction_receipt(tx_hash))
            .await?;
        let status = TxStatus::from_receipt(receipt.as_ref());

        let input = tx.inner.input();
        let payload = if input.is_empty() {
            None
        } else {
            Some(input.to_string())
        };
        let block_number = tx
            .block_number
            .or_else(|| receipt.as_ref().and_then(|r| r.block_number));

        Ok(Some(TransactionRecord {
            hash: tx_hash.to_string(),
            from: tx.inner.signer().to_string(),
            to: tx.inner.to().map(|a| a.to_string()),
            value: format_ether(tx.inner.value()),
            payload,
            timestamp: unix_now(),
            block_number,
            status,
        }))
    }

    /// Poll until the transaction is buried under the configured number of
    /// confirmation blocks, or the timeout elapses.
    pub async fn wait_for_confirmation(
        &self,
        hash: &str,
        timeout_secs: u64,
        chain: Option<&str>,
    ) -> ClientResult<TransactionRecord> {
        let required = self.config().rpc.confirmation_blocks;
        let poll_interval = Duration::from_millis(self.config().rpc.poll_interval_ms);

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let record = match self.get_transaction(hash, chain).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %hash, "Transaction not yet known");
                        continue;
                    }
                };

                match record.status {
                    TxStatus::Pending => {
                        tracing::debug!(tx_hash = %hash, "Transaction pending");
                    }
                    TxStatus::Failed => return Ok(record),
                    TxStatus::Confirmed => {
                        let current = self.get_block_number(chain).await?;
                        let tx_block = record.block_number.unwrap_or(current);
                        let confirmations = current.saturating_sub(tx_block) as u32;

                        if confirmations >= required {
                            return Ok(record);
                        }

                        tracing::debug!(
                            tx_hash = %hash,
                            confirmations = confirmations,
                            required = required,
                            "Waiting for confirmations"
                        );
                    }
                }
            }
        })
        .await;

        match result {
            Ok(record) => record,
            Err(_) => Err(ClientError::ConfirmationTimeout(required)),
        }
    }

    /// Sign a message with the Ethereum personal-message prefix.
    ///
    /// Returns the 65-byte signature hex encoded with a 0x prefix.
    pub async fn sign_message(&self, message: &[u8], private_key: &str) -> ClientResult<String> {
        // Chain ID is irrelevant for personal-message signatures.
        let wallet = Wallet::from_private_key(private_key, 0)?;
        let signature = wallet.sign_message(message).await?;
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }

    /// Verify a personal-message signature against an expected address.
    pub fn verify_message(
        &self,
        message: &[u8],
        signature_hex: &str,
        expected_address: &str,
    ) -> ClientResult<bool> {
        let expected: Address = expected_address.parse().map_err(|e| {
            ClientError::Validation(format!("Invalid address '{}': {}", expected_address, e))
        })?;

        let raw = hex::decode(signature_hex.strip_prefix("0x").unwrap_or(signature_hex))
            .map_err(|e| ClientError::Validation(format!("Invalid signature hex: {}", e)))?;
        let signature = Signature::try_from(raw.as_slice())
            .map_err(|e| ClientError::Validation(format!("Invalid signature: {}", e)))?;

        match signature.recover_address_from_msg(message) {
            Ok(recovered) => Ok(recovered == expected),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::NetworkDescriptor;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn test_client() -> BlockchainClient {
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
        BlockchainClient::new(Arc::new(config))
    }

    #[tokio::test]
    async fn test_unknown_chain_is_rejected() {
        let client = test_client();
        let err = client
            .get_balance(TEST_ADDRESS, Some("mumbai"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::UnknownChain(_)));
    }

    #[tokio::test]
    async fn test_malformed_address_is_rejected_before_rpc() {
        let client = test_client();
        let err = client.get_balance("not-an-address", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_amount_is_rejected_before_rpc() {
        let client = test_client();
        let err = client
            .send_transaction(TEST_ADDRESS, "one ether", TEST_PRIVATE_KEY, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_tx_hash_is_rejected() {
        let client = test_client();
        let err = client.get_transaction("0x1234", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sign_and_verify_roundtrip() {
        let client = test_client();
        let message = b"whisper in the dark";

        let signature = client.sign_message(message, TEST_PRIVATE_KEY).await.unwrap();
        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 2 + 65 * 2);

        assert!(client
            .verify_message(message, &signature, TEST_ADDRESS)
            .unwrap());
        // Tampered message fails verification.
        assert!(!client
            .verify_message(b"whisper in the light", &signature, TEST_ADDRESS)
            .unwrap());
        // Wrong expected address fails verification.
        assert!(!client
            .verify_message(
                message,
                &signature,
                "0x0000000000000000000000000000000000000001"
            )
            .unwrap());
    }

    #[tokio::test]
    async fn test_garbage_signature_is_validation_error() {
        let client = test_client();
        let err = client
            .verify_message(b"m", "0xzz", TEST_ADDRESS)
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
