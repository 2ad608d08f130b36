//! Payload attributes derived from an L1 block.

use alloc::vec::Vec;
use alloy_primitives::{Address, B256, Bytes};
use op_alloy_rpc_types_engine::OpPayloadAttributes;

use crate::DEPOSIT_TX_TYPE;

/// The inputs of an L2 block, handed to the execution engine to build the block.
///
/// `transactions[0]` is always the encoded L1 info transaction, followed by the encoded user
/// deposits in the order they were emitted on L1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PayloadAttributes {
    /// The timestamp of the L1 block.
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub timestamp: u64,
    /// The mix digest of the L1 block.
    pub random: B256,
    /// The fee recipient. Always the zero address, no one collects fees on deposits.
    pub suggested_fee_recipient: Address,
    /// The opaque EIP-2718 encoded transactions.
    pub transactions: Vec<Bytes>,
}

impl PayloadAttributes {
    /// Returns the encoded L1 info transaction, if present.
    pub fn l1_info_tx(&self) -> Option<&Bytes> {
        self.transactions.first()
    }

    /// Returns the encoded user deposits.
    pub fn user_deposits(&self) -> &[Bytes] {
        self.transactions.get(1..).unwrap_or_default()
    }

    /// Returns `true` if all transactions in the payload are deposits.
    pub fn is_deposits_only(&self) -> bool {
        self.transactions.iter().all(|tx| tx.first().is_some_and(|ty| *ty == DEPOSIT_TX_TYPE))
    }
}

impl From<PayloadAttributes> for OpPayloadAttributes {
    fn from(attributes: PayloadAttributes) -> Self {
        Self {
            payload_attributes: alloy_rpc_types_engine::PayloadAttributes {
                timestamp: attributes.timestamp,
                prev_randao: attributes.random,
                suggested_fee_recipient: attributes.suggested_fee_recipient,
                withdrawals: None,
                parent_beacon_block_root: None,
            },
            transactions: Some(attributes.transactions),
            no_tx_pool: Some(true),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::L1BlockInfo;
    use alloy_primitives::{U256, b256};

    fn attributes() -> PayloadAttributes {
        let info = L1BlockInfo::new(1, 2, U256::from(3), B256::repeat_byte(0x04));
        PayloadAttributes {
            timestamp: 2,
            random: b256!("1111111111111111111111111111111111111111111111111111111111111111"),
            suggested_fee_recipient: Address::ZERO,
            transactions: vec![info.to_deposit_tx().encode_opaque().unwrap()],
        }
    }

    #[test]
    fn test_accessors() {
        let attributes = attributes();
        assert_eq!(attributes.l1_info_tx(), attributes.transactions.first());
        assert!(attributes.user_deposits().is_empty());
        assert!(attributes.is_deposits_only());

        let empty = PayloadAttributes::default();
        assert!(empty.l1_info_tx().is_none());
        assert!(empty.user_deposits().is_empty());
    }

    #[test]
    fn test_is_deposits_only_rejects_other_types() {
        let mut attributes = attributes();
        attributes.transactions.push(Bytes::from(vec![0x02, 0xC0]));
        assert!(!attributes.is_deposits_only());
    }

    #[test]
    fn test_into_op_payload_attributes() {
        let attributes = attributes();
        let op: OpPayloadAttributes = attributes.clone().into();
        assert_eq!(op.payload_attributes.timestamp, attributes.timestamp);
        assert_eq!(op.payload_attributes.prev_randao, attributes.random);
        assert_eq!(op.payload_attributes.suggested_fee_recipient, Address::ZERO);
        assert_eq!(op.transactions, Some(attributes.transactions));
        assert_eq!(op.no_tx_pool, Some(true));
        assert_eq!(op.gas_limit, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_payload_attributes_serde() {
        let attributes = attributes();
        let json = serde_json::to_value(&attributes).unwrap();
        assert_eq!(json["timestamp"], "0x2");
        assert_eq!(json["suggestedFeeRecipient"], "0x0000000000000000000000000000000000000000");
        let back: PayloadAttributes = serde_json::from_value(json).unwrap();
        assert_eq!(back, attributes);
    }
}
