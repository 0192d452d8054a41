//! Collectible contract subsystem.
//!
//! Typed bindings and a thin mint facade over the deployed WhisperChain
//! collectible contract. All contract rules (cap, price, ownership) are
//! enforced on-chain; the facade only preflights and normalizes.

pub mod minter;

pub use minter::{preflight_mint, ContractError, MintReceipt, NftMinter, WhisperCollectible};
