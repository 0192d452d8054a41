//! Shared utilities for integration testing.

use std::io::Write;
use tempfile::NamedTempFile;

/// A two-network config pointing at loopback endpoints nothing listens on.
pub fn test_config_toml() -> &'static str {
    r#"
    default_chain = "local"

    [rpc]
    timeout_secs = 2
    confirmation_blocks = 1
    poll_interval_ms = 100

    [networks.local]
    name = "Local Devnet"
    chain_id = 31337
    rpc_url = "http://127.0.0.1:59999"

    [networks.testnet]
    name = "Whisper Testnet"
    chain_id = 11155111
    rpc_url = "http://127.0.0.1:59998"
    explorer_url = "https://explorer.example.org"

    [messaging]
    max_plaintext_bytes = 512

    [contract.addresses]
    local = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
    "#
}

/// Write a config to a temp file the caller keeps alive.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}
