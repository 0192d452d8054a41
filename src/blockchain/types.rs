//! Chain-specific types and error definitions.

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
///
/// Every variant propagates directly to the caller; the SDK performs no
/// retry or recovery of its own.
#[derive(Debug, Error)]
pub enum ClientError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Chain key has no registered network descriptor.
    #[error("Unknown chain '{0}'")]
    UnknownChain(String),

    /// Invalid private key format or signing error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Malformed address, hash, or amount input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transaction or receipt missing on the queried node.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transaction was not confirmed within the expected time.
    #[error("Transaction not confirmed after {0} blocks")]
    ConfirmationTimeout(u32),
}

/// Result type for blockchain operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = ClientError::UnknownChain("mumbai".to_string());
        assert!(err.to_string().contains("mumbai"));
    }
}
