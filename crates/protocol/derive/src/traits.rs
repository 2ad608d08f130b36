//! Read-only views over an L1 block used during derivation.

use alloy_consensus::{Header, Sealed};
use alloy_primitives::{B256, U256};
use opnode_protocol::L1BlockInfo;

/// The L1 block fields carried into the L1 info transaction.
pub trait L1Info {
    /// Returns the block number.
    fn number(&self) -> u64;

    /// Returns the block timestamp.
    fn timestamp(&self) -> u64;

    /// Returns the block hash.
    fn hash(&self) -> B256;

    /// Returns the block base fee, zero for blocks without one.
    fn base_fee(&self) -> U256;

    /// Collects the fields into an [`L1BlockInfo`].
    fn l1_block_info(&self) -> L1BlockInfo {
        L1BlockInfo::new(self.number(), self.timestamp(), self.base_fee(), self.hash())
    }
}

/// A block committing to its receipts.
pub trait ReceiptsRoot {
    /// Returns the claimed receipts trie root.
    fn receipts_root(&self) -> B256;
}

/// Everything the block input deriver reads from an L1 block.
pub trait BlockInput: L1Info + ReceiptsRoot {
    /// Returns the mix digest, used as the L2 block's randomness.
    fn mix_digest(&self) -> B256;
}

impl L1Info for Sealed<Header> {
    fn number(&self) -> u64 {
        self.inner().number
    }

    fn timestamp(&self) -> u64 {
        self.inner().timestamp
    }

    fn hash(&self) -> B256 {
        Sealed::hash(self)
    }

    fn base_fee(&self) -> U256 {
        self.inner().base_fee_per_gas.map(U256::from).unwrap_or_default()
    }
}

impl ReceiptsRoot for Sealed<Header> {
    fn receipts_root(&self) -> B256 {
        self.inner().receipts_root
    }
}

impl BlockInput for Sealed<Header> {
    fn mix_digest(&self) -> B256 {
        self.inner().mix_hash
    }
}

impl L1Info for alloy_rpc_types_eth::Header {
    fn number(&self) -> u64 {
        self.inner.number
    }

    fn timestamp(&self) -> u64 {
        self.inner.timestamp
    }

    fn hash(&self) -> B256 {
        self.hash
    }

    fn base_fee(&self) -> U256 {
        self.inner.base_fee_per_gas.map(U256::from).unwrap_or_default()
    }
}

impl ReceiptsRoot for alloy_rpc_types_eth::Header {
    fn receipts_root(&self) -> B256 {
        self.inner.receipts_root
    }
}

impl BlockInput for alloy_rpc_types_eth::Header {
    fn mix_digest(&self) -> B256 {
        self.inner.mix_hash
    }
}
