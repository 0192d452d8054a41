//! Blockchain facade subsystem.
//!
//! # Data Flow
//! ```text
//! WhisperConfig (chain descriptors, timeouts)
//!     → network::registry (one cached provider per chain)
//!     → client.rs (balance / transfer / lookup / gas / block queries)
//!     → transaction.rs (normalized TransactionRecord values)
//! ```
//!
//! # Security Constraints
//! - Private keys come from call arguments or environment variables only
//! - Never log private keys or signatures alongside addresses
//! - All RPC calls run under the configured timeout

pub mod address;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::{TransactionRecord, TxStatus};
pub use types::{ChainId, ClientError, ClientResult};
pub use wallet::{Wallet, WalletRecord};
