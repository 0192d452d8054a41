//! Textual format validation for addresses, hashes, and keys.
//!
//! Validation is purely lexical: a value is checked against the chain's
//! canonical hex shape, never parsed structurally. EIP-55 checksum casing is
//! accepted but not enforced.

use once_cell::sync::Lazy;
use regex::Regex;

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address regex"));

static TX_HASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{64}$").expect("tx hash regex"));

static PRIVATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0x)?[0-9a-fA-F]{64}$").expect("private key regex"));

/// Whether `address` matches the canonical `0x` + 40 hex characters shape.
pub fn is_valid_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

/// Whether `hash` matches the canonical `0x` + 64 hex characters shape.
pub fn is_valid_tx_hash(hash: &str) -> bool {
    TX_HASH_RE.is_match(hash)
}

/// Whether `key` is 64 hex characters, with or without a `0x` prefix.
pub fn is_valid_private_key(key: &str) -> bool {
    PRIVATE_KEY_RE.is_match(key)
}
