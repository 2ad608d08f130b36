//! Test utilities for building deposit contract events.

use crate::{DEPOSIT_CONTRACT_ADDRESS, DEPOSIT_EVENT_ABI_HASH};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, Log, LogData, U256};

/// Builds a well-formed deposit contract [`Log`].
#[derive(Debug, Clone)]
pub struct DepositEventBuilder {
    emitter: Address,
    from: Address,
    to: Address,
    value: U256,
    mint: U256,
    gas: u64,
    creation: bool,
    data: Vec<u8>,
    padding: usize,
}

impl Default for DepositEventBuilder {
    fn default() -> Self {
        Self {
            emitter: DEPOSIT_CONTRACT_ADDRESS,
            from: Address::ZERO,
            to: Address::ZERO,
            value: U256::ZERO,
            mint: U256::ZERO,
            gas: 0,
            creation: false,
            data: Vec::new(),
            padding: 0,
        }
    }
}

impl DepositEventBuilder {
    /// Sets the address emitting the log.
    pub const fn emitter(mut self, emitter: Address) -> Self {
        self.emitter = emitter;
        self
    }

    /// Sets the depositor.
    pub const fn from(mut self, from: Address) -> Self {
        self.from = from;
        self
    }

    /// Sets the recipient.
    pub const fn to(mut self, to: Address) -> Self {
        self.to = to;
        self
    }

    /// Sets the transferred value.
    pub const fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Sets the minted amount.
    pub const fn mint(mut self, mint: U256) -> Self {
        self.mint = mint;
        self
    }

    /// Sets the gas limit.
    pub const fn gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    /// Sets the contract creation flag.
    pub const fn creation(mut self, creation: bool) -> Self {
        self.creation = creation;
        self
    }

    /// Sets the deposit payload.
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Appends zero bytes after the payload.
    pub const fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Builds the log.
    pub fn build(self) -> Log {
        let mut data = Vec::with_capacity(192 + self.data.len() + self.padding);
        data.extend_from_slice(&self.value.to_be_bytes::<32>());
        data.extend_from_slice(&self.mint.to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(self.gas).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(self.creation as u8).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(160).to_be_bytes::<32>());
        data.extend_from_slice(&U256::from(self.data.len()).to_be_bytes::<32>());
        data.extend_from_slice(&self.data);
        data.resize(data.len() + self.padding, 0);

        Log {
            address: self.emitter,
            data: LogData::new_unchecked(
                alloc::vec![DEPOSIT_EVENT_ABI_HASH, self.from.into_word(), self.to.into_word()],
                Bytes::from(data),
            ),
        }
    }
}
