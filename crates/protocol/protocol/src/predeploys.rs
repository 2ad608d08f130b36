//! Addresses of the L2 predeploys targeted by derived transactions.

use alloy_primitives::{Address, address};

/// Container for the predeploy contract addresses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Predeploys;

impl Predeploys {
    /// The `L1Block` predeploy, which receives the L1 block values carried by the first
    /// transaction of every L2 block.
    pub const L1_BLOCK_INFO: Address = address!("0x4242424242424242424242424242424242424242");
}
