//! The block input deriver.

use crate::{BlockInput, DeriveError, L1Info, compute_receipts_root, derive_user_deposits};
use alloc::vec::Vec;
use alloy_consensus::ReceiptEnvelope;
use alloy_primitives::Address;
use opnode_protocol::{DepositTx, PayloadAttributes};
use tracing::{debug, warn};

/// Builds the L1 info deposit transaction of the block.
pub fn derive_l1_info_tx<B: L1Info>(block: &B) -> DepositTx {
    block.l1_block_info().to_deposit_tx()
}

/// Derives the [`PayloadAttributes`] of the L2 block built on top of the given L1 block.
///
/// The receipts must be the full, ordered receipts of the block. They are checked against the
/// block's receipts root before anything is derived from them. The resulting transactions are the
/// L1 info deposit followed by the user deposits, all EIP-2718 encoded.
pub fn derive_block_inputs<B: BlockInput>(
    block: &B,
    receipts: &[ReceiptEnvelope],
) -> Result<PayloadAttributes, DeriveError> {
    let block_number = block.number();

    let computed = compute_receipts_root(receipts);
    let expected = block.receipts_root();
    if computed != expected {
        warn!(
            target: "derive",
            block_number,
            %expected,
            %computed,
            "Receipts do not match the block's receipts root"
        );
        return Err(record(DeriveError::IntegrityMismatch { expected, computed }));
    }

    let l1_info_tx = derive_l1_info_tx(block);
    let user_deposits = derive_user_deposits(block_number, receipts).map_err(record)?;

    let mut transactions = Vec::with_capacity(user_deposits.len() + 1);
    for tx in core::iter::once(&l1_info_tx).chain(user_deposits.iter()) {
        let encoded = tx.encode_opaque().map_err(|source| {
            record(DeriveError::Encoding {
                block_number,
                transaction_index: tx.transaction_index,
                source,
            })
        })?;
        transactions.push(encoded);
    }

    debug!(
        target: "derive",
        block_number,
        block_hash = %block.hash(),
        user_deposits = user_deposits.len(),
        "Derived block inputs"
    );

    #[cfg(feature = "metrics")]
    crate::metrics::Metrics::record_derived(user_deposits.len());

    Ok(PayloadAttributes {
        timestamp: block.timestamp(),
        random: block.mix_digest(),
        suggested_fee_recipient: Address::ZERO,
        transactions,
    })
}

#[allow(clippy::missing_const_for_fn)]
fn record(err: DeriveError) -> DeriveError {
    #[cfg(feature = "metrics")]
    crate::metrics::Metrics::record_error(&err);
    err
}
