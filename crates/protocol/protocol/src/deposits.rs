//! Decoding of deposit contract log events into [`DepositTx`]s.

use crate::DepositTx;
use alloy_primitives::{Address, B256, Bytes, Log, TxKind, U256, address, b256};

/// Deposit log event abi signature.
pub const DEPOSIT_EVENT_ABI: &str =
    "TransactionDeposited(address,address,uint256,uint256,uint256,bool,bytes)";

/// Deposit event abi hash.
///
/// `keccak256("TransactionDeposited(address,address,uint256,uint256,uint256,bool,bytes)")`
pub const DEPOSIT_EVENT_ABI_HASH: B256 =
    b256!("26137a5e34446f63aa9ea28797a0e70c3987720913879898802dd60b944615ad");

/// The L1 deposit contract. Only logs emitted by this address are treated as deposits.
pub const DEPOSIT_CONTRACT_ADDRESS: Address =
    address!("0xdeaddeaddeaddeaddeaddeaddeaddeaddead0001");

/// The minimum length of the deposit event data: six 32 byte words.
pub const DEPOSIT_EVENT_DATA_MIN_LEN: usize = 6 * 32;

/// The data offset word value that is rejected by the decoder.
const REJECTED_DATA_OFFSET: U256 = U256::from_limbs([128, 0, 0, 0]);

/// A deposit event log decoding error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DepositError {
    /// Unexpected number of deposit event log topics.
    #[error("Unexpected number of deposit event log topics: {0}, expected 3")]
    UnexpectedTopicsLen(usize),
    /// Invalid deposit event selector.
    /// Expected: [`B256`] (deposit event selector), Actual: [`B256`] (event log topic).
    #[error("Invalid deposit event selector: {1}, expected {0}")]
    InvalidSelector(B256, B256),
    /// The event data is shorter than the fixed-width fields.
    #[error("Deposit event data too small: {0} bytes, expected at least 192")]
    DataTooShort(usize),
    /// The gas word does not fit in a `u64`.
    #[error("Bad deposit gas value: {0}")]
    GasOverflow(Bytes),
    /// The data offset word equals 128.
    #[error("Incorrect deposit data offset: 128")]
    InvalidDataOffset,
    /// The data length word does not fit in a `u64`.
    #[error("Deposit data too large: {0}")]
    DataLengthOverflow(Bytes),
    /// The declared data length exceeds the bytes remaining in the event data.
    #[error("Deposit data length too long: {len}, expected max {max}")]
    DataLengthTooLong {
        /// The declared data length.
        len: u64,
        /// The number of bytes available after the fixed-width fields.
        max: u64,
    },
}

/// Decodes a deposit transaction from an EVM log event emitted by the deposit contract.
///
/// The emitted log must be in format:
/// ```solidity
/// event TransactionDeposited(
///    address indexed from,
///    address indexed to,
///    uint256 mint,
///    uint256 value,
///    uint256 gasLimit,
///    bool isCreation,
///    bytes data
/// );
/// ```
///
/// The unindexed data is read as six words followed by the payload:
///
/// ```text
/// +--------+--------------------------------+
/// | Offset | Field                          |
/// +--------+--------------------------------+
/// | 0      | value                          |
/// | 32     | mint                           |
/// | 64     | gas                            |
/// | 96     | isCreation (last byte)         |
/// | 128    | data offset                    |
/// | 160    | data length                    |
/// | 192    | data, possibly zero padded     |
/// +--------+--------------------------------+
/// ```
///
/// The `block_height` and `transaction_index` are assigned by the caller. The upper 12 bytes of
/// the address topics are ignored.
pub fn decode_deposit(
    block_height: u64,
    transaction_index: u64,
    log: &Log,
) -> Result<DepositTx, DepositError> {
    let topics = log.data.topics();
    if topics.len() != 3 {
        return Err(DepositError::UnexpectedTopicsLen(topics.len()));
    }
    if topics[0] != DEPOSIT_EVENT_ABI_HASH {
        return Err(DepositError::InvalidSelector(DEPOSIT_EVENT_ABI_HASH, topics[0]));
    }
    let data = log.data.data.as_ref();
    if data.len() < DEPOSIT_EVENT_DATA_MIN_LEN {
        return Err(DepositError::DataTooShort(data.len()));
    }

    let from = Address::from_word(topics[1]);
    let to = Address::from_word(topics[2]);

    let value = U256::from_be_slice(&data[0..32]);

    let mint = U256::from_be_slice(&data[32..64]);
    let mint = (!mint.is_zero()).then_some(mint);

    let gas: u64 = U256::from_be_slice(&data[64..96])
        .try_into()
        .map_err(|_| DepositError::GasOverflow(Bytes::copy_from_slice(&data[64..96])))?;

    let to = if data[127] == 0 { TxKind::Call(to) } else { TxKind::Create };

    if U256::from_be_slice(&data[128..160]) == REJECTED_DATA_OFFSET {
        return Err(DepositError::InvalidDataOffset);
    }

    let data_len: u64 = U256::from_be_slice(&data[160..192])
        .try_into()
        .map_err(|_| DepositError::DataLengthOverflow(Bytes::copy_from_slice(&data[160..192])))?;

    let max = (data.len() - DEPOSIT_EVENT_DATA_MIN_LEN) as u64;
    if data_len > max {
        return Err(DepositError::DataLengthTooLong { len: data_len, max });
    }

    let payload = &data[DEPOSIT_EVENT_DATA_MIN_LEN..DEPOSIT_EVENT_DATA_MIN_LEN + data_len as usize];

    Ok(DepositTx {
        block_height,
        transaction_index,
        from,
        to,
        mint,
        value,
        gas,
        data: Bytes::copy_from_slice(payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::DepositEventBuilder;
    use alloc::vec;
    use alloy_primitives::{LogData, U64, keccak256};
    use proptest::prelude::*;
    use rstest::rstest;

    fn log_with(topics: Vec<B256>, data: Vec<u8>) -> Log {
        Log {
            address: DEPOSIT_CONTRACT_ADDRESS,
            data: LogData::new_unchecked(topics, Bytes::from(data)),
        }
    }

    fn valid_topics() -> Vec<B256> {
        vec![DEPOSIT_EVENT_ABI_HASH, B256::default(), B256::default()]
    }

    #[test]
    fn test_deposit_event_abi_hash() {
        assert_eq!(keccak256(DEPOSIT_EVENT_ABI), DEPOSIT_EVENT_ABI_HASH);
    }

    #[rstest]
    #[case::no_topics(0)]
    #[case::two_topics(2)]
    #[case::four_topics(4)]
    fn test_decode_deposit_unexpected_topics_len(#[case] len: usize) {
        let log = log_with(vec![DEPOSIT_EVENT_ABI_HASH; len], vec![0u8; 192]);
        let err = decode_deposit(1, 1, &log).unwrap_err();
        assert_eq!(err, DepositError::UnexpectedTopicsLen(len));
    }

    #[test]
    fn test_decode_deposit_invalid_first_topic() {
        let log = log_with(vec![B256::default(); 3], vec![0u8; 192]);
        let err = decode_deposit(1, 1, &log).unwrap_err();
        assert_eq!(err, DepositError::InvalidSelector(DEPOSIT_EVENT_ABI_HASH, B256::default()));
    }

    #[rstest]
    #[case::empty(0)]
    #[case::one_short(191)]
    fn test_decode_deposit_data_too_short(#[case] len: usize) {
        let log = log_with(valid_topics(), vec![0u8; len]);
        let err = decode_deposit(1, 1, &log).unwrap_err();
        assert_eq!(err, DepositError::DataTooShort(len));
    }

    #[test]
    fn test_decode_deposit_gas_overflow() {
        let mut data = vec![0u8; 192];
        data[64 + 23] = 0x01;
        let log = log_with(valid_topics(), data.clone());
        let err = decode_deposit(1, 1, &log).unwrap_err();
        assert_eq!(err, DepositError::GasOverflow(Bytes::copy_from_slice(&data[64..96])));
    }

    #[test]
    fn test_decode_deposit_max_gas_fits() {
        let mut data = vec![0u8; 192];
        data[88..96].copy_from_slice(&u64::MAX.to_be_bytes());
        let log = log_with(valid_topics(), data);
        assert_eq!(decode_deposit(1, 1, &log).unwrap().gas, u64::MAX);
    }

    #[test]
    fn test_decode_deposit_rejects_data_offset_128() {
        let mut data = vec![0u8; 192];
        let offset: [u8; 8] = U64::from(128).to_be_bytes();
        data[152..160].copy_from_slice(&offset);
        let log = log_with(valid_topics(), data);
        let err = decode_deposit(1, 1, &log).unwrap_err();
        assert_eq!(err, DepositError::InvalidDataOffset);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::abi_offset(192)]
    #[case::one_off(129)]
    fn test_decode_deposit_other_data_offsets_accepted(#[case] offset: u64) {
        let mut data = vec![0u8; 192];
        data[152..160].copy_from_slice(&offset.to_be_bytes());
        let log = log_with(valid_topics(), data);
        assert!(decode_deposit(1, 1, &log).is_ok());
    }

    #[test]
    fn test_decode_deposit_data_length_overflow() {
        let mut data = vec![0u8; 192];
        data[160] = 0xFF;
        let log = log_with(valid_topics(), data.clone());
        let err = decode_deposit(1, 1, &log).unwrap_err();
        assert_eq!(err, DepositError::DataLengthOverflow(Bytes::copy_from_slice(&data[160..192])));
    }

    #[test]
    fn test_decode_deposit_data_length_too_long() {
        let mut data = vec![0u8; 192 + 32];
        data[184..192].copy_from_slice(&33u64.to_be_bytes());
        let log = log_with(valid_topics(), data);
        let err = decode_deposit(1, 1, &log).unwrap_err();
        assert_eq!(err, DepositError::DataLengthTooLong { len: 33, max: 32 });
    }

    #[test]
    fn test_decode_deposit_discards_padding() {
        let log = DepositEventBuilder::default()
            .data(vec![0xAA; 5])
            .padding(27)
            .build();
        assert_eq!(log.data.data.len(), 192 + 32);
        let tx = decode_deposit(3, 2, &log).unwrap();
        assert_eq!(tx.data, Bytes::from(vec![0xAA; 5]));
    }

    #[test]
    fn test_decode_deposit_zero_mint_is_absent() {
        let log = DepositEventBuilder::default().mint(U256::ZERO).build();
        assert_eq!(decode_deposit(1, 1, &log).unwrap().mint, None);
    }

    #[test]
    fn test_decode_deposit_creation_flag() {
        let to = address!("0x00000000000000000000000000000000000000bb");
        let call = DepositEventBuilder::default().to(to).build();
        assert_eq!(decode_deposit(1, 1, &call).unwrap().to, TxKind::Call(to));

        let create = DepositEventBuilder::default().to(to).creation(true).build();
        assert_eq!(decode_deposit(1, 1, &create).unwrap().to, TxKind::Create);
    }

    #[test]
    fn test_decode_deposit_ignores_upper_topic_bytes() {
        let from = address!("0x00000000000000000000000000000000000000aa");
        let mut word = from.into_word();
        word.0[..12].fill(0xFF);
        let mut log = DepositEventBuilder::default().from(from).build();
        log.data = LogData::new_unchecked(
            vec![DEPOSIT_EVENT_ABI_HASH, word, B256::default()],
            log.data.data.clone(),
        );
        assert_eq!(decode_deposit(1, 1, &log).unwrap().from, from);
    }

    #[test]
    fn test_decode_deposit_full() {
        let from = address!("0x00000000000000000000000000000000000000aa");
        let to = address!("0x00000000000000000000000000000000000000bb");
        let log = DepositEventBuilder::default()
            .from(from)
            .to(to)
            .value(U256::from(1_000))
            .mint(U256::from(7))
            .gas(21_000)
            .data(vec![0xDE, 0xAD])
            .build();
        let tx = decode_deposit(100, 4, &log).unwrap();
        assert_eq!(
            tx,
            DepositTx {
                block_height: 100,
                transaction_index: 4,
                from,
                to: TxKind::Call(to),
                mint: Some(U256::from(7)),
                value: U256::from(1_000),
                gas: 21_000,
                data: Bytes::from(vec![0xDE, 0xAD]),
            }
        );
    }

    proptest! {
        #[test]
        fn test_decode_deposit_preserves_fields(
            from in any::<[u8; 20]>(),
            to in any::<[u8; 20]>(),
            value in any::<[u8; 32]>(),
            mint in any::<[u8; 32]>(),
            gas in any::<u64>(),
            creation in any::<bool>(),
            data in proptest::collection::vec(any::<u8>(), 0..200),
            padding in 0usize..64,
        ) {
            let (from, to) = (Address::from(from), Address::from(to));
            let (value, mint) = (U256::from_be_bytes(value), U256::from_be_bytes(mint));
            let log = DepositEventBuilder::default()
                .from(from)
                .to(to)
                .value(value)
                .mint(mint)
                .gas(gas)
                .creation(creation)
                .data(data.clone())
                .padding(padding)
                .build();

            let tx = decode_deposit(9, 1, &log).unwrap();
            prop_assert_eq!(tx.from, from);
            prop_assert_eq!(tx.to, if creation { TxKind::Create } else { TxKind::Call(to) });
            prop_assert_eq!(tx.value, value);
            prop_assert_eq!(tx.mint, (!mint.is_zero()).then_some(mint));
            prop_assert_eq!(tx.gas, gas);
            prop_assert_eq!(tx.data, Bytes::from(data));
            prop_assert_eq!(tx.block_height, 9);
            prop_assert_eq!(tx.transaction_index, 1);
        }
    }
}
