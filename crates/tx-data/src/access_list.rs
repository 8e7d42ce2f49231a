//! This module contains the [TxAccessList] transaction data type.

use crate::{
    util::{decode_to, encode_to, to_length},
    copy_address, copy_bytes, RawSignature, TxData, TxDataResult, TxType,
};
use alloc::vec::Vec;
use alloy_eips::eip2930::{AccessList, AccessListItem};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{BufMut, Decodable, Encodable, Header};

/// The transaction data of an [EIP-2930] access list transaction.
///
/// [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxAccessList {
    /// Chain id the transaction is valid on.
    pub chain_id: U256,
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
    /// Addresses and storage keys the transaction plans to access.
    pub access_list: AccessList,
    /// Signature y-parity.
    pub v: U256,
    /// Signature `r` value.
    pub r: U256,
    /// Signature `s` value.
    pub s: U256,
}

impl TxAccessList {
    fn unsigned_fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.gas_price.length()
            + self.gas.length()
            + to_length(self.to.as_ref())
            + self.value.length()
            + self.data.length()
            + self.access_list.length()
    }

    /// Length of all fields, including the signature, without a RLP header.
    pub(crate) fn fields_len(&self) -> usize {
        self.unsigned_fields_len() + self.v.length() + self.r.length() + self.s.length()
    }

    fn encode_unsigned_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.encode(out);
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas.encode(out);
        encode_to(self.to.as_ref(), out);
        self.value.encode(out);
        self.data.encode(out);
        self.access_list.encode(out);
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
            chain_id: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
            gas_price: Decodable::decode(buf)?,
            gas: Decodable::decode(buf)?,
            to: decode_to(buf)?,
            value: Decodable::decode(buf)?,
            data: Decodable::decode(buf)?,
            access_list: Decodable::decode(buf)?,
            v: Decodable::decode(buf)?,
            r: Decodable::decode(buf)?,
            s: Decodable::decode(buf)?,
        })
    }

    /// Returns the hash the sender signed over: `keccak256(0x01 || rlp(unsigned fields))`.
    pub fn signature_hash(&self) -> B256 {
        let payload_length = self.unsigned_fields_len();
        let mut buf = Vec::with_capacity(payload_length + 10);
        buf.put_u8(TxType::AccessList as u8);
        Header { list: true, payload_length }.encode(&mut buf);
        self.encode_unsigned_fields(&mut buf);
        keccak256(&buf)
    }
}

impl TxData for TxAccessList {
    fn tx_type(&self) -> TxType {
        TxType::AccessList
    }

    fn chain_id(&self) -> U256 {
        self.chain_id
    }

    fn access_list(&self) -> &[AccessListItem] {
        &self.access_list.0
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

    fn set_signature_values(&mut self, chain_id: U256, v: U256, r: U256, s: U256) {
        (self.chain_id, self.v, self.r, self.s) = (chain_id, v, r, s);
    }

    fn deep_copy(&self) -> Self {
        Self {
            chain_id: self.chain_id,
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas: self.gas,
            to: copy_address(self.to.as_ref()),
            value: self.value,
            data: copy_bytes(&self.data),
            access_list: self.access_list.clone(),
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

impl Encodable for TxAccessList {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        alloy_rlp::length_of_length(payload_length) + payload_length
    }
}

impl Decodable for TxAccessList {
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
