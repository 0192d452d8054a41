use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use whisperchain::blockchain::address::{is_valid_address, is_valid_tx_hash};
use whisperchain::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use whisperchain::config::load_config;
use whisperchain::messaging::{
    generate_keypair, hash, EncryptedMessageRecord, MessagePublicKey, MessageSecretKey, Messenger,
};
use whisperchain::BlockchainClient;

#[derive(Parser)]
#[command(name = "whisper-cli")]
#[command(about = "Management CLI for the WhisperChain client SDK", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "whisperchain.toml")]
    config: PathBuf,

    /// Chain key override (defaults to the configured default chain).
    #[arg(long)]
    chain: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the native balance of an address
    Balance { address: String },
    /// Send a native-token transfer (key from WHISPER_PRIVATE_KEY)
    Send { to: String, amount: String },
    /// Look up a transaction by hash
    Tx { hash: String },
    /// Print the latest block number
    BlockNumber,
    /// Print the current gas price in wei
    GasPrice,
    /// Generate a messaging keypair
    Keygen,
    /// Encrypt a message to a recipient public key
    Encrypt {
        /// Recipient public key, base64
        recipient: String,
        /// Sender secret key, base64
        #[arg(long)]
        secret: String,
        /// Message text
        message: String,
        /// Time-to-live in seconds (0 = never expires)
        #[arg(long, default_value_t = 0)]
        ttl: u64,
    },
    /// Decrypt a message record (JSON)
    Decrypt {
        /// EncryptedMessageRecord as JSON
        record: String,
        /// Recipient secret key, base64
        #[arg(long)]
        secret: String,
    },
    /// SHA-512 digest of a string
    Hash { data: String },
    /// Check address / tx hash format
    Validate { value: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Messaging and validation commands are offline; only chain commands
    // need a loaded config.
    match &cli.command {
        Commands::Keygen => {
            let pair = generate_keypair();
            println!("public:  {}", pair.public.to_base64());
            println!("secret:  {}", pair.secret.to_base64());
            return Ok(());
        }
        Commands::Encrypt {
            recipient,
            secret,
            message,
            ttl,
        } => {
            let recipient = MessagePublicKey::from_base64(recipient)?;
            let secret = MessageSecretKey::from_base64(secret)?;
            let messenger = Messenger::new(Default::default());
            let record =
                messenger.encrypt_message(message.as_bytes(), &recipient, &secret, Some(*ttl))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            return Ok(());
        }
        Commands::Decrypt { record, secret } => {
            let record: EncryptedMessageRecord = serde_json::from_str(record)?;
            let secret = MessageSecretKey::from_base64(secret)?;
            let messenger = Messenger::new(Default::default());
            let plaintext = messenger.decrypt_message(&record, &secret)?;
            println!("{}", String::from_utf8_lossy(&plaintext));
            return Ok(());
        }
        Commands::Hash { data } => {
            println!("{}", hash(data.as_bytes()));
            return Ok(());
        }
        Commands::Validate { value } => {
            if is_valid_address(value) {
                println!("valid address");
            } else if is_valid_tx_hash(value) {
                println!("valid transaction hash");
            } else {
                println!("invalid");
            }
            return Ok(());
        }
        _ => {}
    }

    let config = Arc::new(load_config(&cli.config)?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "whisperchain={}",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = BlockchainClient::new(config);
    let chain = cli.chain.as_deref();

    match cli.command {
        Commands::Balance { address } => {
            let balance = client.get_balance(&address, chain).await?;
            println!("{}", balance);
        }
        Commands::Send { to, amount } => {
            let private_key = std::env::var(PRIVATE_KEY_ENV_VAR)
                .map_err(|_| format!("{} not set", PRIVATE_KEY_ENV_VAR))?;
            let record = client
                .send_transaction(&to, &amount, &private_key, chain)
                .await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Tx { hash } => match client.get_transaction(&hash, chain).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("transaction not found"),
        },
        Commands::BlockNumber => {
            println!("{}", client.get_block_number(chain).await?);
        }
        Commands::GasPrice => {
            println!("{}", client.get_gas_price(chain).await?);
        }
        _ => unreachable!("offline commands handled above"),
    }

    Ok(())
}
