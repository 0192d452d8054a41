//! Walkthrough: query a balance, send a transfer, poll for confirmation.
//!
//! Expects a node at the configured RPC endpoint and WHISPER_PRIVATE_KEY in
//! the environment. Run with: cargo run --example transfer

use std::path::Path;
use std::sync::Arc;

use whisperchain::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use whisperchain::config::load_config;
use whisperchain::BlockchainClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config(Path::new("whisperchain.toml"))?);
    let client = BlockchainClient::new(config);

    let recipient = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    let balance = client.get_balance(recipient, None).await?;
    println!("Recipient balance: {} ETH", balance);

    let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)?;
    let record = client
        .send_transaction(recipient, "0.01", &private_key, None)
        .await?;
    println!("Submitted {} (status: {})", record.hash, record.status);

    let confirmed = client.wait_for_confirmation(&record.hash, 120, None).await?;
    println!(
        "Final status: {} in block {:?}",
        confirmed.status, confirmed.block_number
    );

    Ok(())
}
