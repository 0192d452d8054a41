//! Encrypted messaging subsystem.
//!
//! # Data Flow
//! ```text
//! keys.rs (x25519 keypairs, base64 transport encoding)
//!     → seal.rs (box construction: DH → KDF → AEAD)
//!     → EncryptedMessageRecord (ciphertext + nonce + participants + expiry)
//! ```
//!
//! # Security Constraints
//! - Delegates entirely to audited primitives; no algorithm of its own
//! - Secret keys zeroized on drop, redacted in Debug output
//! - No retained session state: every call is single-shot

pub mod keys;
pub mod seal;
pub mod types;

pub use keys::{generate_keypair, MessageKeyPair, MessagePublicKey, MessageSecretKey};
pub use seal::{hash, Messenger};
pub use types::{EncryptedMessageRecord, MessagingError, MessagingResult};
