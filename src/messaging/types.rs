//! Messaging records and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during messaging operations.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// Key material had the wrong length or encoding.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Plaintext exceeds the configured size limit.
    #[error("Message of {size} bytes exceeds the {max} byte limit")]
    MessageTooLarge { size: usize, max: usize },

    /// Ciphertext failed authentication or could not be decrypted.
    #[error("Decryption failed")]
    DecryptionFailed,

    /// The record's expiry timestamp has passed.
    #[error("Message expired")]
    MessageExpired,

    /// Base64 or AEAD encoding failure.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type for messaging operations.
pub type MessagingResult<T> = Result<T, MessagingError>;

/// An encrypted message envelope. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedMessageRecord {
    /// AEAD ciphertext, base64 encoded.
    pub ciphertext: String,
    /// AEAD nonce, base64 encoded.
    pub nonce: String,
    /// Sender's x25519 public key, base64 encoded.
    pub sender_public_key: String,
    /// Recipient's x25519 public key, base64 encoded.
    pub recipient_public_key: String,
    /// Seconds since the Unix epoch at encryption time.
    pub timestamp: u64,
    /// Expiry timestamp; `None` means the message never expires.
    pub expires_at: Option<u64>,
}

impl EncryptedMessageRecord {
    /// Whether the record has expired as of `now` (seconds since epoch).
    pub fn is_expired(&self, now: u64) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}
