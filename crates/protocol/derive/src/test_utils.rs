//! Test utilities for building L1 blocks and receipts.

use crate::compute_receipts_root;
use alloc::vec::Vec;
use alloy_consensus::{Header, Receipt, ReceiptEnvelope, ReceiptWithBloom, Sealed};
use alloy_primitives::{B256, Bloom, Log};

/// Builds a legacy receipt with the given status and logs.
pub fn receipt(success: bool, logs: Vec<Log>) -> ReceiptEnvelope {
    ReceiptEnvelope::Legacy(ReceiptWithBloom {
        receipt: Receipt { status: success.into(), cumulative_gas_used: 21_000, logs },
        logs_bloom: Bloom::default(),
    })
}

/// Builds a sealed L1 header at the given height committing to the receipts.
pub fn sealed_block(number: u64, receipts: &[ReceiptEnvelope]) -> Sealed<Header> {
    let header = Header {
        number,
        parent_hash: B256::with_last_byte(number.wrapping_sub(1) as u8),
        timestamp: 1_700_000_000 + number * 12,
        base_fee_per_gas: Some(7),
        mix_hash: B256::repeat_byte(0x11),
        receipts_root: compute_receipts_root(receipts),
        ..Default::default()
    };
    let hash = header.hash_slow();
    Sealed::new_unchecked(header, hash)
}
