//! Public-key box encryption for messages.
//!
//! # Construction
//! ```text
//! shared = X25519(our_secret, their_public)
//! key    = SHA-256(domain || shared)
//! sealed = ChaCha20-Poly1305(key, random 12-byte nonce, plaintext)
//! ```
//! Both directions of a conversation derive the same key, so the recipient
//! opens with their secret key and the sender's public key. This module only
//! wires audited primitives together; it implements no algorithm of its own.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha512};
use x25519_dalek::{PublicKey, StaticSecret};

use crate::blockchain::transaction::unix_now;
use crate::config::schema::MessagingConfig;
use crate::messaging::keys::{MessagePublicKey, MessageSecretKey};
use crate::messaging::types::{EncryptedMessageRecord, MessagingError, MessagingResult};

/// Domain separation label for the message key derivation.
const KDF_DOMAIN: &[u8] = b"whisperchain.message.v1";

/// AEAD nonce length in bytes.
pub const NONCE_LENGTH: usize = 12;

/// Stateless messaging facade. Every operation is a single-shot call.
#[derive(Debug, Clone)]
pub struct Messenger {
    config: MessagingConfig,
}

impl Messenger {
    /// Create a messenger with the given limits.
    pub fn new(config: MessagingConfig) -> Self {
        Self { config }
    }

    /// Encrypt a message to a recipient.
    ///
    /// `ttl_secs` overrides the configured default time-to-live; a resolved
    /// ttl of 0 produces a record that never expires.
    pub fn encrypt_message(
        &self,
        plaintext: &[u8],
        recipient_public: &MessagePublicKey,
        sender_secret: &MessageSecretKey,
        ttl_secs: Option<u64>,
    ) -> MessagingResult<EncryptedMessageRecord> {
        let max = self.config.max_plaintext_bytes;
        if plaintext.len() > max {
            return Err(MessagingError::MessageTooLarge {
                size: plaintext.len(),
                max,
            });
        }

        let key = derive_key(sender_secret, recipient_public);
        let cipher = ChaCha20Poly1305::new(&key);

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from(nonce_bytes);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| MessagingError::Encoding("AEAD encryption failed".to_string()))?;

        let timestamp = unix_now();
        let ttl = ttl_secs.unwrap_or(self.config.default_ttl_secs);
        let expires_at = (ttl > 0).then(|| timestamp + ttl);

        Ok(EncryptedMessageRecord {
            ciphertext: BASE64.encode(ciphertext),
            nonce: BASE64.encode(nonce_bytes),
            sender_public_key: sender_secret.public_key().to_base64(),
            recipient_public_key: recipient_public.to_base64(),
            timestamp,
            expires_at,
        })
    }

    /// Decrypt a message record with the recipient's secret key.
    ///
    /// Refuses expired records; an authentication failure (tampered
    /// ciphertext, wrong key) surfaces as `DecryptionFailed`.
    pub fn decrypt_message(
        &self,
        record: &EncryptedMessageRecord,
        recipient_secret: &MessageSecretKey,
    ) -> MessagingResult<Vec<u8>> {
        if record.is_expired(unix_now()) {
            return Err(MessagingError::MessageExpired);
        }

        let sender_public = MessagePublicKey::from_base64(&record.sender_public_key)?;
        let ciphertext = BASE64
            .decode(&record.ciphertext)
            .map_err(|e| MessagingError::Encoding(format!("bad ciphertext base64: {}", e)))?;
        let nonce_bytes = BASE64
            .decode(&record.nonce)
            .map_err(|e| MessagingError::Encoding(format!("bad nonce base64: {}", e)))?;
        let nonce_bytes: [u8; NONCE_LENGTH] = nonce_bytes
            .try_into()
            .map_err(|_| MessagingError::Encoding("expected 12 nonce bytes".to_string()))?;

        let key = derive_key(recipient_secret, &sender_public);
        let cipher = ChaCha20Poly1305::new(&key);

        cipher
            .decrypt(&Nonce::from(nonce_bytes), ciphertext.as_slice())
            .map_err(|_| MessagingError::DecryptionFailed)
    }
}

/// Derive the shared AEAD key for one (secret, public) pair.
fn derive_key(secret: &MessageSecretKey, public: &MessagePublicKey) -> Key {
    let our_secret = StaticSecret::from(secret.0);
    let their_public = PublicKey::from(*public.as_bytes());
    let shared = our_secret.diffie_hellman(&their_public);

    let mut hasher = Sha256::new();
    hasher.update(KDF_DOMAIN);
    hasher.update(shared.as_bytes());
    let digest = hasher.finalize();

    Key::clone_from_slice(&digest)
}

/// SHA-512 digest of arbitrary data, hex encoded.
pub fn hash(data: &[u8]) -> String {
    hex::encode(Sha512::digest(data))
}
