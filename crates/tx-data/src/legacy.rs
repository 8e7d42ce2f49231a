//! This module contains the [TxLegacy] transaction data type.

use crate::{
    derive_chain_id, is_protected_v,
    util::{decode_to, encode_to, to_length},
    copy_address, copy_bytes, RawSignature, TxData, TxDataResult, TxType,
};
use alloc::vec::Vec;
use alloy_eips::eip2930::AccessListItem;
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{BufMut, Decodable, Encodable, Header};

/// The transaction data of a legacy (pre-[EIP-2718]) transaction.
///
/// The chain id is not stored; it is derived from `v` per [EIP-155].
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
/// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TxLegacy {
    /// Nonce of the sender account.
    pub nonce: u64,
    /// Wei paid per unit of gas.
    pub gas_price: U256,
    /// Gas limit.
    pub gas: u64,
    /// Recipient of the call, or `None` for contract creation.
    pub to: Option<Address>,
    /// Wei transferred to the recipient.
    pub value: U256,
    /// Contract invocation input data, or init code for contract creation.
    pub data: Bytes,
    /// Signature recovery value.
    pub v: U256,
    /// Signature `r` value.
    pub r: U256,
    /// Signature `s` value.
    pub s: U256,
}

impl TxLegacy {
    /// Length of the unsigned fields, without a RLP header.
    fn unsigned_fields_len(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas.length()
            + to_length(self.to.as_ref())
            + self.value.length()
            + self.data.length()
    }

    /// Length of all fields, including the signature, without a RLP header.
    pub(crate) fn fields_len(&self) -> usize {
        self.unsigned_fields_len() + self.v.length() + self.r.length() + self.s.length()
    }

    fn encode_unsigned_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas.encode(out);
        encode_to(self.to.as_ref(), out);
        self.value.encode(out);
        self.data.encode(out);
    }

    /// Encodes the fields into `out`, without a RLP header.
    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        self.encode_unsigned_fields(out);
        self.v.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    /// Decodes the fields from `buf`.
    ///
    /// NOTE: This assumes a RLP header has already been decoded.
    pub(crate) fn decode_fields(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Ok(Self {
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas: Decodable::decode(buf)?,
            to: decode_to(buf)?,
            value: Decodable::decode(buf)?,
            data: Decodable::decode(buf)?,
            v: Decodable::decode(buf)?,
            r: Decodable::decode(buf)?,
            s: Decodable::decode(buf)?,
        })
    }

    /// Returns the hash the sender signed over.
    ///
    /// Protected transactions append `(chain_id, 0, 0)` to the signed fields per [EIP-155].
    ///
    /// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
    pub fn signature_hash(&self) -> B256 {
        let mut payload_length = self.unsigned_fields_len();
        let chain_id = is_protected_v(self.v).then(|| derive_chain_id(self.v));
        if let Some(chain_id) = chain_id {
            payload_length += chain_id.length() + 2 * 0u8.length();
        }

        let mut buf = Vec::with_capacity(payload_length + 9);
        Header { list: true, payload_length }.encode(&mut buf);
        self.encode_unsigned_fields(&mut buf);
        if let Some(chain_id) = chain_id {
            chain_id.encode(&mut buf);
            0u8.encode(&mut buf);
            0u8.encode(&mut buf);
        }
        keccak256(&buf)
    }
}

impl TxData for TxLegacy {
    fn tx_type(&self) -> TxType {
        TxType::Legacy
    }

    fn chain_id(&self) -> U256 {
        derive_chain_id(self.v)
    }

    fn access_list(&self) -> &[AccessListItem] {
        &[]
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn gas(&self) -> u64 {
        self.gas
    }

    fn gas_price(&self) -> U256 {
        self.gas_price
    }

    fn gas_tip_cap(&self) -> U256 {
        self.gas_price
    }

    fn gas_fee_cap(&self) -> U256 {
        self.gas_price
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn to(&self) -> Option<Address> {
        self.to
    }

    fn effective_gas_price<'a>(&self, dst: &'a mut U256, _: Option<U256>) -> &'a U256 {
        *dst = self.gas_price;
        dst
    }

    fn raw_signature_values(&self) -> RawSignature {
        RawSignature::new(self.v, self.r, self.s)
    }

    fn set_signature_values(&mut self, _: U256, v: U256, r: U256, s: U256) {
        (self.v, self.r, self.s) = (v, r, s);
    }

    fn deep_copy(&self) -> Self {
        Self {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas: self.gas,
            to: copy_address(self.to.as_ref()),
            value: self.value,
            data: copy_bytes(&self.data),
            v: self.v,
            r: self.r,
            s: self.s,
        }
    }

    fn encode(&self, out: &mut dyn BufMut) -> TxDataResult<()> {
        Encodable::encode(self, out);
        Ok(())
    }

    fn decode(buf: &mut &[u8]) -> TxDataResult<Self> {
        Ok(<Self as Decodable>::decode(buf)?)
    }
}

impl Encodable for TxLegacy {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        alloy_rlp::length_of_length(payload_length) + payload_length
    }
}

impl Decodable for TxLegacy {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(alloy_rlp::Error::UnexpectedString);
        }
        let remaining = buf.len();
        if header.payload_length > remaining {
            return Err(alloy_rlp::Error::InputTooShort);
        }

        let tx = Self::decode_fields(buf)?;

        if buf.len() + header.payload_length != remaining {
            return Err(alloy_rlp::Error::ListLengthMismatch {
                expected: header.payload_length,
                got: remaining - buf.len(),
            });
        }
        Ok(tx)
    }
}
