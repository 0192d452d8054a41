//! Transaction records and status mapping.
//!
//! # Responsibilities
//! - Normalize raw RPC replies into `TransactionRecord` value objects
//! - Map receipts onto the pending/confirmed/failed status space
//!
//! A record's status is authoritative only as of the last query; it is never
//! advanced locally. Re-query the network to observe a transition.

use alloy::rpc::types::TransactionReceipt;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Transaction confirmation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// Transaction is pending in the mempool (no receipt yet).
    Pending,
    /// The receipt reports successful execution.
    Confirmed,
    /// The receipt reports a revert.
    Failed,
}

impl TxStatus {
    /// Status as reported by a receipt, or `Pending` when none exists yet.
    pub fn from_receipt(receipt: Option<&TransactionReceipt>) -> Self {
        match receipt {
            Some(r) if r.status() => TxStatus::Confirmed,
            Some(_) => TxStatus::Failed,
            None => TxStatus::Pending,
        }
    }
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TxStatus::Pending => "pending",
            TxStatus::Confirmed => "confirmed",
            TxStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Normalized view of a submitted or queried transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash.
    pub hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address, if any.
    pub to: Option<String>,
    /// Transferred value as a decimal string in the native unit.
    pub value: String,
    /// Call data, hex encoded, when the transaction carried any.
    pub payload: Option<String>,
    /// Seconds since the Unix epoch at record creation.
    pub timestamp: u64,
    /// Block the transaction was included in, once mined.
    pub block_number: Option<u64>,
    /// Status as of the last network query.
    pub status: TxStatus,
}

impl TransactionRecord {
    /// Record for a freshly submitted transfer, before any receipt exists.
    pub fn pending(hash: String, from: String, to: String, value: String) -> Self {
        Self {
            hash,
            from,
            to: Some(to),
            value,
            payload: None,
            timestamp: unix_now(),
            block_number: None,
            status: TxStatus::Pending,
        }
    }
}

/// Current wall-clock time as seconds since the Unix epoch.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_record() {
        let record = TransactionRecord::pending(
            "0xabc".to_string(),
            "0xsender".to_string(),
            "0xrecipient".to_string(),
            "1.5".to_string(),
        );
        assert_eq!(record.status, TxStatus::Pending);
        assert!(record.block_number.is_none());
        assert!(record.payload.is_none());
        assert!(record.timestamp > 0);
    }

    #[test]
    fn test_status_serde_is_lowercase() {
        let json = serde_json::to_string(&TxStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let back: TxStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(back, TxStatus::Failed);
    }

    #[test]
    fn test_no_receipt_means_pending() {
        assert_eq!(TxStatus::from_receipt(None), TxStatus::Pending);
    }

    #[test]
    fn test_record_roundtrip() {
        let record = TransactionRecord {
            hash: "0x1".to_string(),
            from: "0x2".to_string(),
            to: None,
            value: "0.25".to_string(),
            payload: Some("0xdeadbeef".to_string()),
            timestamp: 1700000000,
            block_number: Some(42),
            status: TxStatus::Confirmed,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.block_number, Some(42));
        assert_eq!(back.status, TxStatus::Confirmed);
    }
}
