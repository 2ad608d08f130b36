//! Block identity types.

use alloy_consensus::{Header, Sealed};
use alloy_eips::BlockNumHash;
use alloy_primitives::B256;
use derive_more::Display;

/// Identifies a block by its hash and height.
///
/// The height is trusted input: nothing here verifies that `number` is the true height of the
/// block identified by `hash`.
#[derive(Debug, Display, Clone, Copy, Eq, Hash, PartialEq, Default)]
#[display("{number}:{hash}")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockId {
    /// The block hash
    pub hash: B256,
    /// The block number
    pub number: u64,
}

impl BlockId {
    /// Instantiates a new [`BlockId`].
    pub const fn new(hash: B256, number: u64) -> Self {
        Self { hash, number }
    }

    /// Returns `true` if this is the zero-value sentinel.
    pub fn is_zero(&self) -> bool {
        self.number == 0 && self.hash.is_zero()
    }
}

impl From<BlockNumHash> for BlockId {
    fn from(id: BlockNumHash) -> Self {
        Self { hash: id.hash, number: id.number }
    }
}

impl From<BlockId> for BlockNumHash {
    fn from(id: BlockId) -> Self {
        Self { hash: id.hash, number: id.number }
    }
}

/// A new chain head paired with its immediate parent.
///
/// `head.number == parent.number + 1` for every head above genesis. For the genesis head the
/// parent is the zero-value [`BlockId`].
#[derive(Debug, Display, Clone, Copy, Eq, Hash, PartialEq, Default)]
#[display("{parent} -> {head}")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadSignal {
    /// The parent of the new head.
    pub parent: BlockId,
    /// The new head.
    pub head: BlockId,
}

impl HeadSignal {
    /// Builds a [`HeadSignal`] from the identity of a header and its parent hash.
    pub fn new(hash: B256, number: u64, parent_hash: B256) -> Self {
        let parent = number
            .checked_sub(1)
            .map(|parent_number| BlockId::new(parent_hash, parent_number))
            .unwrap_or_default();
        Self { parent, head: BlockId::new(hash, number) }
    }

    /// Returns `true` if the head is the genesis block.
    pub const fn is_genesis(&self) -> bool {
        self.head.number == 0
    }

    /// Returns `true` if this signal builds directly on the head of `previous`.
    ///
    /// A `false` result on consecutive signals means the chain reorganised or heads were skipped.
    pub fn extends(&self, previous: &Self) -> bool {
        self.parent == previous.head
    }
}

impl From<&alloy_rpc_types_eth::Header> for HeadSignal {
    fn from(header: &alloy_rpc_types_eth::Header) -> Self {
        Self::new(header.hash, header.inner.number, header.inner.parent_hash)
    }
}

impl From<&Sealed<Header>> for HeadSignal {
    fn from(header: &Sealed<Header>) -> Self {
        Self::new(header.hash(), header.number, header.parent_hash)
    }
}
