//! Error types for block input derivation.

use alloy_primitives::B256;
use opnode_protocol::{DepositError, EncodingError};
use thiserror::Error;

/// An error deriving the inputs of an L2 block.
///
/// Derivation is all-or-nothing: any of these aborts the attempt for the whole L1 block.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeriveError {
    /// The receipts do not hash to the block's receipts root.
    #[error("Receipts are not consistent with the block's receipts root {expected}, computed {computed}")]
    IntegrityMismatch {
        /// The receipts root claimed by the block.
        expected: B256,
        /// The root computed from the supplied receipts.
        computed: B256,
    },
    /// A log emitted by the deposit contract could not be decoded.
    #[error(
        "Malformed L1 deposit log in block {block_number}, receipt {receipt_index}, log {log_index}: {source}"
    )]
    MalformedDeposit {
        /// The L1 block number.
        block_number: u64,
        /// The position of the receipt within the block.
        receipt_index: usize,
        /// The position of the log within its receipt.
        log_index: usize,
        /// The decoding failure.
        #[source]
        source: DepositError,
    },
    /// A derived transaction could not be encoded.
    #[error("Failed to encode transaction {transaction_index} derived from block {block_number}: {source}")]
    Encoding {
        /// The L1 block number.
        block_number: u64,
        /// The index of the transaction within the derived block.
        transaction_index: u64,
        /// The encoding failure.
        #[source]
        source: EncodingError,
    },
}

impl DeriveError {
    /// Returns a short label naming the kind of error.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IntegrityMismatch { .. } => "integrity_mismatch",
            Self::MalformedDeposit { .. } => "malformed_deposit",
            Self::Encoding { .. } => "encoding",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::error::Error;

    #[test]
    fn test_derive_error_source() {
        let err = DeriveError::MalformedDeposit {
            block_number: 1,
            receipt_index: 2,
            log_index: 3,
            source: DepositError::UnexpectedTopicsLen(1),
        };
        assert!(err.source().is_some());
        assert_eq!(err.kind(), "malformed_deposit");

        let err = DeriveError::IntegrityMismatch { expected: B256::ZERO, computed: B256::ZERO };
        assert!(err.source().is_none());
        assert_eq!(err.kind(), "integrity_mismatch");
    }

    #[test]
    fn test_derive_error_display_carries_context() {
        let err = DeriveError::Encoding {
            block_number: 10,
            transaction_index: 4,
            source: EncodingError::ZeroMint,
        };
        let msg = err.to_string();
        assert!(msg.contains("transaction 4"));
        assert!(msg.contains("block 10"));
    }
}
