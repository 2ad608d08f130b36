//! Derivation of user deposits from L1 receipts.

use crate::DeriveError;
use alloc::vec::Vec;
use alloy_consensus::ReceiptEnvelope;
use opnode_protocol::{DEPOSIT_CONTRACT_ADDRESS, DepositTx, decode_deposit};

/// Derives the user deposits of an L1 block from its receipts.
///
/// Failed receipts are skipped. Every log of a successful receipt emitted by the deposit contract
/// is decoded, in emission order, and numbered from `1`: index `0` belongs to the L1 info
/// transaction. The first log that fails to decode aborts the whole derivation.
///
/// The receipts are not checked against the block here, see [`crate::check_receipts`].
pub fn derive_user_deposits(
    block_number: u64,
    receipts: &[ReceiptEnvelope],
) -> Result<Vec<DepositTx>, DeriveError> {
    let mut deposits = Vec::new();

    for (receipt_index, receipt) in receipts.iter().enumerate() {
        if !receipt.is_success() {
            continue;
        }
        for (log_index, log) in receipt.logs().iter().enumerate() {
            if log.address != DEPOSIT_CONTRACT_ADDRESS {
                continue;
            }
            let transaction_index = deposits.len() as u64 + 1;
            let deposit = decode_deposit(block_number, transaction_index, log).map_err(|source| {
                DeriveError::MalformedDeposit { block_number, receipt_index, log_index, source }
            })?;
            deposits.push(deposit);
        }
    }

    Ok(deposits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::receipt;
    use alloy_primitives::{Address, B256, Bytes, Log, LogData, U256, address};
    use core::mem::discriminant;
    use opnode_protocol::{DEPOSIT_EVENT_ABI_HASH, DepositError, test_utils::DepositEventBuilder};
    use rstest::rstest;

    /// Builds a deposit log and lets `f` corrupt its topics and data.
    fn corrupted(f: impl FnOnce(&mut Vec<B256>, &mut Vec<u8>)) -> Log {
        let log = DepositEventBuilder::default().data(vec![0xab; 4]).build();
        let mut topics = log.data.topics().to_vec();
        let mut data = log.data.data.to_vec();
        f(&mut topics, &mut data);
        Log { address: log.address, data: LogData::new_unchecked(topics, data.into()) }
    }

    #[test]
    fn test_derive_user_deposits_empty() {
        assert_eq!(derive_user_deposits(1, &[]), Ok(vec![]));
        assert_eq!(derive_user_deposits(1, &[receipt(true, vec![])]), Ok(vec![]));
    }

    #[test]
    fn test_derive_user_deposits_indices_in_encounter_order() {
        let receipts = vec![
            receipt(
                true,
                vec![
                    DepositEventBuilder::default().gas(1).build(),
                    DepositEventBuilder::default().gas(2).build(),
                ],
            ),
            receipt(true, vec![DepositEventBuilder::default().gas(3).build()]),
        ];
        let deposits = derive_user_deposits(50, &receipts).unwrap();
        assert_eq!(deposits.len(), 3);
        for (i, deposit) in deposits.iter().enumerate() {
            assert_eq!(deposit.transaction_index, i as u64 + 1);
            assert_eq!(deposit.gas, i as u64 + 1);
            assert_eq!(deposit.block_height, 50);
        }
    }

    #[test]
    fn test_derive_user_deposits_skips_failed_receipts() {
        let receipts = vec![
            receipt(false, vec![DepositEventBuilder::default().gas(1).build()]),
            receipt(true, vec![DepositEventBuilder::default().gas(2).build()]),
        ];
        let deposits = derive_user_deposits(1, &receipts).unwrap();
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].gas, 2);
        assert_eq!(deposits[0].transaction_index, 1);
    }

    #[test]
    fn test_derive_user_deposits_only_deposit_in_failed_receipt() {
        let receipts = vec![
            receipt(true, vec![]),
            receipt(false, vec![DepositEventBuilder::default().gas(21_000).build()]),
        ];
        assert_eq!(derive_user_deposits(3, &receipts), Ok(vec![]));
    }

    #[test]
    fn test_derive_user_deposits_skips_failed_malformed_logs() {
        let malformed = DepositEventBuilder::default().build();
        let malformed = alloy_primitives::Log {
            address: malformed.address,
            data: LogData::new_unchecked(vec![], malformed.data.data),
        };
        let receipts = vec![receipt(false, vec![malformed])];
        assert_eq!(derive_user_deposits(1, &receipts), Ok(vec![]));
    }

    #[test]
    fn test_derive_user_deposits_ignores_other_emitters() {
        let other = address!("0x00000000000000000000000000000000000000cc");
        let receipts = vec![receipt(
            true,
            vec![
                DepositEventBuilder::default().emitter(other).build(),
                DepositEventBuilder::default().value(U256::from(9)).build(),
                alloy_primitives::Log {
                    address: Address::ZERO,
                    data: LogData::new_unchecked(vec![], Default::default()),
                },
            ],
        )];
        let deposits = derive_user_deposits(1, &receipts).unwrap();
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].value, U256::from(9));
    }

    #[test]
    fn test_derive_user_deposits_aborts_on_malformed_log() {
        let mut bad = DepositEventBuilder::default().build();
        bad.data = LogData::new_unchecked(bad.data.topics()[..2].to_vec(), bad.data.data.clone());
        let receipts = vec![
            receipt(true, vec![DepositEventBuilder::default().build()]),
            receipt(true, vec![DepositEventBuilder::default().build(), bad]),
        ];
        let err = derive_user_deposits(7, &receipts).unwrap_err();
        assert_eq!(
            err,
            DeriveError::MalformedDeposit {
                block_number: 7,
                receipt_index: 1,
                log_index: 1,
                source: DepositError::UnexpectedTopicsLen(2),
            }
        );
    }

    #[rstest]
    #[case::topics_len(corrupted(|t, _| { t.pop(); }), DepositError::UnexpectedTopicsLen(2))]
    #[case::selector(
        corrupted(|t, _| t[0] = B256::ZERO),
        DepositError::InvalidSelector(DEPOSIT_EVENT_ABI_HASH, B256::ZERO)
    )]
    #[case::data_too_short(corrupted(|_, d| d.truncate(191)), DepositError::DataTooShort(191))]
    #[case::gas_overflow(corrupted(|_, d| d[64] = 1), DepositError::GasOverflow(Bytes::new()))]
    #[case::data_offset(
        corrupted(|_, d| {
            d[128..160].fill(0);
            d[159] = 128;
        }),
        DepositError::InvalidDataOffset
    )]
    #[case::data_length_overflow(
        corrupted(|_, d| d[160] = 1),
        DepositError::DataLengthOverflow(Bytes::new())
    )]
    #[case::data_length_too_long(
        corrupted(|_, d| d[191] = 0xff),
        DepositError::DataLengthTooLong { len: 0, max: 0 }
    )]
    fn test_derive_user_deposits_reports_malformed_log(
        #[case] malformed: Log,
        #[case] expected: DepositError,
    ) {
        let receipts = vec![
            receipt(false, vec![]),
            receipt(true, vec![DepositEventBuilder::default().build()]),
            receipt(true, vec![malformed]),
        ];
        let Err(DeriveError::MalformedDeposit { block_number, receipt_index, log_index, source }) =
            derive_user_deposits(11, &receipts)
        else {
            panic!("expected a malformed deposit error");
        };
        assert_eq!((block_number, receipt_index, log_index), (11, 2, 0));
        assert_eq!(discriminant(&source), discriminant(&expected));
    }
}
