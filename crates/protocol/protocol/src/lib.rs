#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod block;
pub use block::{BlockId, HeadSignal};

mod predeploys;
pub use predeploys::Predeploys;

mod deposits;
pub use deposits::{
    DEPOSIT_CONTRACT_ADDRESS, DEPOSIT_EVENT_ABI, DEPOSIT_EVENT_ABI_HASH, DEPOSIT_EVENT_DATA_MIN_LEN,
    DepositError, decode_deposit,
};

mod deposit_tx;
pub use deposit_tx::{DEPOSIT_TX_TYPE, DepositTx, EncodingError};

mod info;
pub use info::{L1BlockInfo, L1InfoDecodeError};

mod attributes;
pub use attributes::PayloadAttributes;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
