//! The deposit transaction type and its EIP-2718 codec.

use alloc::vec::Vec;
use alloy_eips::{
    Decodable2718, Encodable2718, Typed2718,
    eip2718::{Eip2718Error, Eip2718Result},
};
use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_rlp::{
    Buf, BufMut, Decodable, EMPTY_STRING_CODE, Encodable, Error as DecodeError, Header,
};

/// The EIP-2718 type byte of a [`DepositTx`].
pub const DEPOSIT_TX_TYPE: u8 = 0x7E;

/// An error encountered while encoding a [`DepositTx`].
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// A zero mint must be represented as an absent mint.
    #[error("Deposit mint is present but zero")]
    ZeroMint,
}

/// An L2 transaction synthesized from L1 data.
///
/// Deposits carry no signature and no nonce. They are identified by the L1 block height they were
/// derived from and their position among that block's derived transactions. Index `0` is
/// reserved for the L1 info transaction, user deposits are numbered from `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DepositTx {
    /// The L1 block height the deposit was derived from.
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub block_height: u64,
    /// The position of the deposit within the derived transactions of the L1 block.
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub transaction_index: u64,
    /// The L2 sender.
    pub from: Address,
    /// The recipient, or [`TxKind::Create`] for a contract creation.
    pub to: TxKind,
    /// The amount of ETH minted on L2. `None` when nothing is minted.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mint: Option<U256>,
    /// The value transferred from the sender.
    pub value: U256,
    /// The gas limit of the L2 execution.
    #[cfg_attr(feature = "serde", serde(with = "alloy_serde::quantity"))]
    pub gas: u64,
    /// The calldata, or init code for a contract creation.
    pub data: Bytes,
}

impl DepositTx {
    /// Returns `true` if the deposit creates a contract.
    pub const fn is_creation(&self) -> bool {
        matches!(self.to, TxKind::Create)
    }

    /// Decodes the inner [`DepositTx`] fields from RLP bytes.
    ///
    /// NOTE: This assumes a RLP header has already been decoded, and _just_ decodes the following
    /// RLP fields in the following order:
    ///
    /// - `block_height`
    /// - `transaction_index`
    /// - `from`
    /// - `to`
    /// - `mint`
    /// - `value`
    /// - `gas`
    /// - `data`
    pub fn decode_fields(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Ok(Self {
            block_height: Decodable::decode(buf)?,
            transaction_index: Decodable::decode(buf)?,
            from: Decodable::decode(buf)?,
            to: Decodable::decode(buf)?,
            mint: if *buf.first().ok_or(DecodeError::InputTooShort)? == EMPTY_STRING_CODE {
                buf.advance(1);
                None
            } else {
                Some(Decodable::decode(buf)?)
            },
            value: Decodable::decode(buf)?,
            gas: Decodable::decode(buf)?,
            data: Decodable::decode(buf)?,
        })
    }

    /// Outputs the length of the transaction's fields, without a RLP header.
    fn fields_len(&self) -> usize {
        self.block_height.length()
            + self.transaction_index.length()
            + self.from.length()
            + self.to.length()
            + self.mint.map_or(1, |mint| mint.length())
            + self.value.length()
            + self.gas.length()
            + self.data.length()
    }

    /// Encodes only the transaction's fields into the desired buffer, without a RLP header.
    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.block_height.encode(out);
        self.transaction_index.encode(out);
        self.from.encode(out);
        self.to.encode(out);
        if let Some(mint) = self.mint {
            mint.encode(out);
        } else {
            out.put_u8(EMPTY_STRING_CODE);
        }
        self.value.encode(out);
        self.gas.encode(out);
        self.data.encode(out);
    }

    /// Encodes the deposit into its opaque EIP-2718 form: the type byte followed by the RLP list
    /// of its fields.
    ///
    /// A present but zero mint has no canonical encoding and is rejected.
    pub fn encode_opaque(&self) -> Result<Bytes, EncodingError> {
        if self.mint.is_some_and(|mint| mint.is_zero()) {
            return Err(EncodingError::ZeroMint);
        }
        let mut buf = Vec::with_capacity(self.encode_2718_len());
        self.encode_2718(&mut buf);
        Ok(buf.into())
    }
}

impl Encodable for DepositTx {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        Header { list: true, payload_length }.length() + payload_length
    }
}

impl Decodable for DepositTx {
    fn decode(data: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(data)?;
        if !header.list {
            return Err(DecodeError::UnexpectedString);
        }
        let remaining = data.len();
        if header.payload_length > remaining {
            return Err(DecodeError::InputTooShort);
        }

        let tx = Self::decode_fields(data)?;
        let consumed = remaining - data.len();
        if consumed != header.payload_length {
            return Err(DecodeError::ListLengthMismatch {
                expected: header.payload_length,
                got: consumed,
            });
        }
        Ok(tx)
    }
}

impl Typed2718 for DepositTx {
    fn ty(&self) -> u8 {
        DEPOSIT_TX_TYPE
    }
}

impl Encodable2718 for DepositTx {
    fn type_flag(&self) -> Option<u8> {
        Some(DEPOSIT_TX_TYPE)
    }

    fn encode_2718_len(&self) -> usize {
        1 + self.length()
    }

    fn encode_2718(&self, out: &mut dyn BufMut) {
        out.put_u8(DEPOSIT_TX_TYPE);
        self.encode(out);
    }
}

impl Decodable2718 for DepositTx {
    fn typed_decode(ty: u8, buf: &mut &[u8]) -> Eip2718Result<Self> {
        if ty != DEPOSIT_TX_TYPE {
            return Err(Eip2718Error::UnexpectedType(ty));
        }
        Ok(Self::decode(buf)?)
    }

    fn fallback_decode(_: &mut &[u8]) -> Eip2718Result<Self> {
        Err(Eip2718Error::UnexpectedType(0))
    }
}
