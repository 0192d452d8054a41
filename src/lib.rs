//! WhisperChain Client SDK
//!
//! Thin, config-driven facades over EVM JSON-RPC nodes and audited
//! cryptography crates:
//!
//! ```text
//! whisperchain.toml
//!     → config (schema, loader, validation)
//!     → network::ProviderRegistry (one cached handle per chain)
//!     → blockchain::BlockchainClient (balance / transfer / lookup / gas / block)
//!     → contract::NftMinter (typed collectible contract calls)
//!
//! messaging::Messenger (x25519 box encryption, stateless)
//! ```
//!
//! Every operation is a single-shot request/response; failures propagate to
//! the caller without retry.

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod messaging;
pub mod network;

pub use blockchain::{BlockchainClient, ClientError, TransactionRecord, TxStatus, Wallet, WalletRecord};
pub use config::{load_config, WhisperConfig};
pub use contract::NftMinter;
pub use messaging::{generate_keypair, EncryptedMessageRecord, Messenger};
pub use network::ProviderRegistry;
