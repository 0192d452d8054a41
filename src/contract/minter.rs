//! Typed facade over the WhisperChain collectible contract.
//!
//! # Responsibilities
//! - Bind the deployed contract's views, mint entry points, and owner ops
//! - Preflight mint calls client-side (supply cap, payment) before spending gas
//! - Decode `Minted` events out of transaction receipts
//!
//! The chain enforces every rule authoritatively; the preflight only saves a
//! doomed transaction's gas.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::ClientError;
use crate::blockchain::wallet::Wallet;

sol! {
    #[sol(rpc)]
    contract WhisperCollectible {
        function maxSupply() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function mintPrice() external view returns (uint256);
        function tokenURI(uint256 tokenId) external view returns (string);

        function mint(address to, string uri) external payable returns (uint256);
        function ownerMint(address to, string uri) external returns (uint256);
        function setMintPrice(uint256 newPrice) external;
        function withdraw() external;

        /// Emitted once per successful mint.
        #[derive(Debug)]
        event Minted(address indexed to, uint256 indexed tokenId, string uri);

        /// Emitted when the owner updates the mint price.
        #[derive(Debug)]
        event MintPriceUpdated(uint256 oldPrice, uint256 newPrice);

        /// Emitted when the owner withdraws the contract balance.
        #[derive(Debug)]
        event Withdrawn(address indexed to, uint256 amount);
    }
}

/// Errors from the collectible contract facade.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Collection is fully minted.
    #[error("Supply exhausted: {minted} of {cap} minted")]
    SupplyExhausted { minted: U256, cap: U256 },

    /// Payment does not cover the mint price.
    #[error("Insufficient payment: sent {sent} wei, required {required} wei")]
    InsufficientPayment { sent: U256, required: U256 },

    /// Malformed contract or recipient address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Underlying RPC or wallet failure.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Outcome of a successful mint, extracted from the receipt's event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintReceipt {
    /// Transaction hash of the mint.
    pub tx_hash: String,
    /// Recipient of the minted token.
    pub to: String,
    /// Token identifier assigned by the contract.
    pub token_id: U256,
    /// Metadata URI attached to the token.
    pub uri: String,
}

/// Client-side mint preflight: supply cap and payment checks.
///
/// Pure over chain state already fetched, so the rules are testable without
/// a node.
pub fn preflight_mint(
    total_supply: U256,
    max_supply: U256,
    payment: U256,
    price: U256,
) -> Result<(), ContractError> {
    if total_supply >= max_supply {
        return Err(ContractError::SupplyExhausted {
            minted: total_supply,
            cap: max_supply,
        });
    }
    if payment < price {
        return Err(ContractError::InsufficientPayment {
            sent: payment,
            required: price,
        });
    }
    Ok(())
}

/// Mint facade bound to one deployed contract and one signing wallet.
#[derive(Clone)]
pub struct NftMinter {
    contract_address: Address,
    provider: DynProvider,
}

impl std::fmt::Debug for NftMinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NftMinter")
            .field("contract_address", &self.contract_address)
            .finish()
    }
}

impl NftMinter {
    /// Bind the facade to a deployed contract.
    ///
    /// The wallet signs every state-changing call; the chain rejects owner
    /// operations from non-owner wallets.
    pub fn new(rpc_url: &str, contract_address: &str, wallet: Wallet) -> Result<Self, ContractError> {
        let contract_address: Address = contract_address
            .parse()
            .map_err(|e| ContractError::InvalidAddress(format!("{}: {}", contract_address, e)))?;
        let rpc_url: url::Url = rpc_url
            .parse()
            .map_err(|e| ContractError::Client(ClientError::Rpc(format!("Invalid RPC URL: {}", e))))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(wallet.signer().clone()))
            .connect_http(rpc_url)
            .erased();

        Ok(Self {
            contract_address,
            provider,
        })
    }

    /// The bound contract address.
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    fn instance(&self) -> WhisperCollectible::WhisperCollectibleInstance<DynProvider> {
        WhisperCollectible::new(self.contract_address, self.provider.clone())
    }

    /// Current mint price in wei.
    pub async fn mint_price(&self) -> Result<U256, ContractError> {
        self.instance()
            .mintPrice()
            .call()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))
    }

    /// Number of tokens minted so far.
    pub async fn total_supply(&self) -> Result<U256, ContractError> {
        self.instance()
            .totalSupply()
            .call()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))
    }

    /// Fixed collection cap.
    pub async fn max_supply(&self) -> Result<U256, ContractError> {
        self.instance()
            .maxSupply()
            .call()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))
    }

    /// Metadata URI of an already minted token.
    pub async fn token_uri(&self, token_id: U256) -> Result<String, ContractError> {
        self.instance()
            .tokenURI(token_id)
            .call()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))
    }

    /// Mint a token to `to`, paying `payment` wei.
    ///
    /// Preflights the supply cap and payment against current chain state,
    /// then submits and waits for the receipt.
    pub async fn mint(&self, to: &str, uri: &str, payment: U256) -> Result<MintReceipt, ContractError> {
        let recipient: Address = to
            .parse()
            .map_err(|e| ContractError::InvalidAddress(format!("{}: {}", to, e)))?;

        let total = self.total_supply().await?;
        let cap = self.max_supply().await?;
        let price = self.mint_price().await?;
        preflight_mint(total, cap, payment, price)?;

        let pending = self
            .instance()
            .mint(recipient, uri.to_string())
            .value(payment)
            .send()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))?;

        self.extract_mint(receipt)
    }

    /// Owner-only free mint.
    pub async fn owner_mint(&self, to: &str, uri: &str) -> Result<MintReceipt, ContractError> {
        let recipient: Address = to
            .parse()
            .map_err(|e| ContractError::InvalidAddress(format!("{}: {}", to, e)))?;

        let pending = self
            .instance()
            .ownerMint(recipient, uri.to_string())
            .send()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))?;

        self.extract_mint(receipt)
    }

    /// Owner-only mint price update.
    pub async fn set_mint_price(&self, new_price: U256) -> Result<String, ContractError> {
        let pending = self
            .instance()
            .setMintPrice(new_price)
            .send()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))?;

        tracing::info!(new_price = %new_price, "Mint price update submitted");
        Ok(pending.tx_hash().to_string())
    }

    /// Owner-only balance withdrawal.
    pub async fn withdraw(&self) -> Result<String, ContractError> {
        let pending = self
            .instance()
            .withdraw()
            .send()
            .await
            .map_err(|e| ContractError::Client(ClientError::Rpc(e.to_string())))?;

        tracing::info!(contract = %self.contract_address, "Withdrawal submitted");
        Ok(pending.tx_hash().to_string())
    }

    /// Pull the `Minted` event out of a mint receipt.
    fn extract_mint(
        &self,
        receipt: alloy::rpc::types::TransactionReceipt,
    ) -> Result<MintReceipt, ContractError> {
        if !receipt.status() {
            return Err(ContractError::Client(ClientError::Rpc(
                "mint transaction reverted".to_string(),
            )));
        }

        for log in receipt.inner.logs() {
            if let Ok(decoded) = log.log_decode::<WhisperCollectible::Minted>() {
                let event = decoded.inner.data;
                tracing::info!(
                    to = %event.to,
                    token_id = %event.tokenId,
                    "Token minted"
                );
                return Ok(MintReceipt {
                    tx_hash: receipt.transaction_hash.to_string(),
                    to: event.to.to_string(),
                    token_id: event.tokenId,
                    uri: event.uri,
                });
            }
        }

        Err(ContractError::Client(ClientError::NotFound(
            "mint receipt carried no Minted event".to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolEvent;

    #[test]
    fn test_preflight_accepts_valid_mint() {
        let result = preflight_mint(
            U256::from(10),
            U256::from(10_000),
            U256::from(2_000_000u64),
            U256::from(1_000_000u64),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_preflight_rejects_exhausted_supply() {
        let err = preflight_mint(
            U256::from(10_000),
            U256::from(10_000),
            U256::from(1_000_000u64),
            U256::from(1_000_000u64),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::SupplyExhausted { .. }));
    }

    #[test]
    fn test_preflight_rejects_underpayment() {
        let err = preflight_mint(
            U256::from(5),
            U256::from(10_000),
            U256::from(999_999u64),
            U256::from(1_000_000u64),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::InsufficientPayment { sent, required }
                if sent < required
        ));
    }

    #[test]
    fn test_exact_payment_is_sufficient() {
        let price = U256::from(1_000_000u64);
        assert!(preflight_mint(U256::ZERO, U256::from(1), price, price).is_ok());
    }

    #[test]
    fn test_minted_event_roundtrip() {
        let event = WhisperCollectible::Minted {
            to: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
                .parse()
                .unwrap(),
            tokenId: U256::from(7),
            uri: "ipfs://QmExample/7.json".to_string(),
        };

        let encoded = event.encode_log_data();
        let decoded = WhisperCollectible::Minted::decode_log_data(&encoded).unwrap();

        assert_eq!(decoded.to, event.to);
        assert_eq!(decoded.tokenId, U256::from(7));
        assert_eq!(decoded.uri, "ipfs://QmExample/7.json");
    }

    #[test]
    fn test_rejects_malformed_contract_address() {
        let wallet = Wallet::generate(1);
        let err = NftMinter::new("http://localhost:8545", "0x1234", wallet).unwrap_err();
        assert!(matches!(err, ContractError::InvalidAddress(_)));
    }
}
