//! The L1 info transaction carried as the first transaction of every derived L2 block.

use crate::{DEPOSIT_CONTRACT_ADDRESS, DepositTx, Predeploys};
use alloc::vec::Vec;
use alloy_primitives::{B256, Bytes, TxKind, U256};

/// An error reading L1 info calldata.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum L1InfoDecodeError {
    /// The calldata does not start with the L1 info selector.
    #[error("Invalid L1 info selector")]
    InvalidSelector,
    /// The calldata has the wrong length.
    /// Expected: [`usize`], Actual: [`usize`].
    #[error("Invalid L1 info calldata length: expected {0}, got {1}")]
    InvalidLength(usize, usize),
}

/// Represents the fields within an L1 info transaction.
///
/// Binary Format
/// +---------+--------------------------+
/// | Bytes   | Field                    |
/// +---------+--------------------------+
/// | 4       | Function signature       |
/// | 8       | L1BlockNumber            |
/// | 8       | Timestamp                |
/// | 32      | BaseFee                  |
/// | 32      | BlockHash                |
/// +---------+--------------------------+
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct L1BlockInfo {
    /// The L1 origin block number
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub number: u64,
    /// The L1 origin block's timestamp
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub time: u64,
    /// The L1 origin block's basefee
    pub base_fee: U256,
    /// The L1 origin block's hash
    pub block_hash: B256,
}

impl L1BlockInfo {
    /// The length of the L1 info transaction calldata.
    pub const L1_INFO_TX_LEN: usize = 4 + 8 + 8 + 32 + 32;

    /// The 4 byte selector of
    /// "setL1BlockValues(uint256 _number, uint256 _timestamp, uint256 _basefee, bytes32 _hash)".
    ///
    /// The parameter names are part of the hashed string.
    pub const L1_INFO_TX_SELECTOR: [u8; 4] = [0x8c, 0x89, 0xc3, 0x86];

    /// The gas limit of the L1 info transaction.
    pub const L1_INFO_TX_GAS: u64 = 99_999_999;

    /// Creates a new [`L1BlockInfo`].
    pub const fn new(number: u64, time: u64, base_fee: U256, block_hash: B256) -> Self {
        Self { number, time, base_fee, block_hash }
    }

    /// Encodes the [`L1BlockInfo`] object into Ethereum transaction calldata.
    pub fn encode_calldata(&self) -> Bytes {
        let mut buf = Vec::with_capacity(Self::L1_INFO_TX_LEN);
        buf.extend_from_slice(Self::L1_INFO_TX_SELECTOR.as_ref());
        buf.extend_from_slice(self.number.to_be_bytes().as_ref());
        buf.extend_from_slice(self.time.to_be_bytes().as_ref());
        buf.extend_from_slice(self.base_fee.to_be_bytes::<{ U256::BYTES }>().as_ref());
        buf.extend_from_slice(self.block_hash.as_ref());
        buf.into()
    }

    /// Decodes the [`L1BlockInfo`] object from Ethereum transaction calldata.
    pub fn decode_calldata(r: &[u8]) -> Result<Self, L1InfoDecodeError> {
        if r.len() != Self::L1_INFO_TX_LEN {
            return Err(L1InfoDecodeError::InvalidLength(Self::L1_INFO_TX_LEN, r.len()));
        }
        if r[0..4] != Self::L1_INFO_TX_SELECTOR {
            return Err(L1InfoDecodeError::InvalidSelector);
        }

        let mut number = [0u8; 8];
        number.copy_from_slice(&r[4..12]);
        let mut time = [0u8; 8];
        time.copy_from_slice(&r[12..20]);

        Ok(Self {
            number: u64::from_be_bytes(number),
            time: u64::from_be_bytes(time),
            base_fee: U256::from_be_slice(&r[20..52]),
            block_hash: B256::from_slice(&r[52..84]),
        })
    }

    /// Builds the L1 info deposit transaction.
    ///
    /// The transaction is always the first of the derived block, sent by the deposit contract to
    /// the [`Predeploys::L1_BLOCK_INFO`] predeploy with no value and no mint.
    pub fn to_deposit_tx(&self) -> DepositTx {
        DepositTx {
            block_height: self.number,
            transaction_index: 0,
            from: DEPOSIT_CONTRACT_ADDRESS,
            to: TxKind::Call(Predeploys::L1_BLOCK_INFO),
            mint: None,
            value: U256::ZERO,
            gas: Self::L1_INFO_TX_GAS,
            data: self.encode_calldata(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{b256, hex, keccak256};

    fn info() -> L1BlockInfo {
        L1BlockInfo::new(
            0x0102030405060708,
            1_650_000_000,
            U256::from(7_000_000_000u64),
            b256!("392012032675be9f94aae5ab442de73c5f4fb1bf30fa7dd0d2442239899a40fc"),
        )
    }

    #[test]
    fn test_l1_info_selector() {
        let hash = keccak256(
            "setL1BlockValues(uint256 _number, uint256 _timestamp, uint256 _basefee, bytes32 _hash)",
        );
        assert_eq!(hash[..4], L1BlockInfo::L1_INFO_TX_SELECTOR);
    }

    #[test]
    fn test_encode_calldata_layout() {
        let info = info();
        let calldata = info.encode_calldata();
        assert_eq!(calldata.len(), 84);
        assert_eq!(calldata[0..4], hex!("8c89c386"));
        assert_eq!(calldata[4..12], hex!("0102030405060708"));
        assert_eq!(calldata[12..20], 1_650_000_000u64.to_be_bytes());
        assert_eq!(U256::from_be_slice(&calldata[20..52]), U256::from(7_000_000_000u64));
        assert!(calldata[20..48].iter().all(|b| *b == 0));
        assert_eq!(calldata[52..84], info.block_hash[..]);
    }

    #[test]
    fn test_encode_calldata_large_base_fee() {
        let info = L1BlockInfo { base_fee: U256::MAX, ..info() };
        let calldata = info.encode_calldata();
        assert!(calldata[20..52].iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_decode_calldata() {
        let info = info();
        assert_eq!(L1BlockInfo::decode_calldata(&info.encode_calldata()), Ok(info));
    }

    #[test]
    fn test_decode_calldata_invalid_length() {
        let err = L1BlockInfo::decode_calldata(&[0x8c, 0x89, 0xc3, 0x86]).unwrap_err();
        assert_eq!(err, L1InfoDecodeError::InvalidLength(84, 4));
    }

    #[test]
    fn test_decode_calldata_invalid_selector() {
        let err = L1BlockInfo::decode_calldata(&[0u8; 84]).unwrap_err();
        assert_eq!(err, L1InfoDecodeError::InvalidSelector);
    }

    #[test]
    fn test_to_deposit_tx() {
        let info = info();
        let tx = info.to_deposit_tx();
        assert_eq!(tx.block_height, info.number);
        assert_eq!(tx.transaction_index, 0);
        assert_eq!(tx.from, DEPOSIT_CONTRACT_ADDRESS);
        assert_eq!(tx.to, TxKind::Call(Predeploys::L1_BLOCK_INFO));
        assert_eq!(tx.mint, None);
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(tx.gas, 99_999_999);
        assert_eq!(tx.data, info.encode_calldata());
        assert!(tx.encode_opaque().is_ok());
    }
}
