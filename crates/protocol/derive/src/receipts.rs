//! Receipts integrity checking.

use crate::ReceiptsRoot;
use alloy_consensus::{ReceiptEnvelope, proofs::ordered_trie_root_with_encoder};
use alloy_eips::Encodable2718;
use alloy_primitives::B256;

/// Computes the ordered trie root of the receipts, keyed by their RLP encoded position, the same
/// way the execution layer commits to them in the block header.
pub fn compute_receipts_root(receipts: &[ReceiptEnvelope]) -> B256 {
    ordered_trie_root_with_encoder(receipts, |receipt, buf| receipt.encode_2718(buf))
}

/// Returns `true` if the receipts hash to the block's receipts root.
///
/// The check is order sensitive: the same receipts in a different order do not match.
pub fn check_receipts<B: ReceiptsRoot>(block: &B, receipts: &[ReceiptEnvelope]) -> bool {
    compute_receipts_root(receipts) == block.receipts_root()
}
