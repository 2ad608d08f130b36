#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[cfg(all(feature = "metrics", not(test)))]
extern crate std;

mod traits;
pub use traits::{BlockInput, L1Info, ReceiptsRoot};

mod errors;
pub use errors::DeriveError;

mod receipts;
pub use receipts::{check_receipts, compute_receipts_root};

mod deposits;
pub use deposits::derive_user_deposits;

mod attributes;
pub use attributes::{derive_block_inputs, derive_l1_info_tx};

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
