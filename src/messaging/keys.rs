//! Messaging key material.
//!
//! x25519 keypairs for the public-key box construction. Secret halves are
//! zeroized on drop and never printed; public halves travel base64 encoded.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::messaging::types::{MessagingError, MessagingResult};

/// Length in bytes of x25519 keys.
pub const KEY_LENGTH: usize = 32;

/// Public half of a messaging keypair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePublicKey(pub(crate) [u8; KEY_LENGTH]);

impl MessagePublicKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }

    /// Base64 text encoding for transport.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Decode from the base64 transport encoding.
    pub fn from_base64(encoded: &str) -> MessagingResult<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| MessagingError::InvalidKey(format!("bad base64: {}", e)))?;
        let bytes: [u8; KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| MessagingError::InvalidKey("expected 32 key bytes".to_string()))?;
        Ok(Self(bytes))
    }
}

/// Secret half of a messaging keypair. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MessageSecretKey(pub(crate) [u8; KEY_LENGTH]);

impl MessageSecretKey {
    /// Base64 text encoding, for key storage by the caller.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Decode from the base64 storage encoding.
    pub fn from_base64(encoded: &str) -> MessagingResult<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| MessagingError::InvalidKey(format!("bad base64: {}", e)))?;
        let bytes: [u8; KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| MessagingError::InvalidKey("expected 32 key bytes".to_string()))?;
        Ok(Self(bytes))
    }

    /// The corresponding public key.
    pub fn public_key(&self) -> MessagePublicKey {
        let secret = StaticSecret::from(self.0);
        MessagePublicKey(PublicKey::from(&secret).to_bytes())
    }
}

impl std::fmt::Debug for MessageSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MessageSecretKey(..)")
    }
}

/// A messaging keypair.
#[derive(Debug, Clone)]
pub struct MessageKeyPair {
    /// Shareable public half.
    pub public: MessagePublicKey,
    /// Secret half, zeroized on drop.
    pub secret: MessageSecretKey,
}

/// Generate a fresh x25519 keypair from OS randomness.
pub fn generate_keypair() -> MessageKeyPair {
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = PublicKey::from(&secret);

    MessageKeyPair {
        public: MessagePublicKey(public.to_bytes()),
        secret: MessageSecretKey(secret.to_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypairs_are_distinct() {
        let a = generate_keypair();
        let b = generate_keypair();
        assert_ne!(a.public, b.public);
    }

    #[test]
    fn test_public_key_base64_roundtrip() {
        let pair = generate_keypair();
        let encoded = pair.public.to_base64();
        let decoded = MessagePublicKey::from_base64(&encoded).unwrap();
        assert_eq!(pair.public, decoded);
    }

    #[test]
    fn test_secret_key_roundtrip_preserves_public_half() {
        let pair = generate_keypair();
        let restored = MessageSecretKey::from_base64(&pair.secret.to_base64()).unwrap();
        assert_eq!(restored.public_key(), pair.public);
    }

    #[test]
    fn test_rejects_wrong_length_keys() {
        let err = MessagePublicKey::from_base64("c2hvcnQ=").unwrap_err();
        assert!(matches!(err, MessagingError::InvalidKey(_)));

        let err = MessagePublicKey::from_base64("!!!not base64!!!").unwrap_err();
        assert!(matches!(err, MessagingError::InvalidKey(_)));
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let pair = generate_keypair();
        let rendered = format!("{:?}", pair.secret);
        assert_eq!(rendered, "MessageSecretKey(..)");
    }
}
