//! This module contains the [TxDynamicFee] transaction data type.

use crate::{
    util::{decode_to, encode_to, to_length},
    copy_address, copy_bytes, RawSignature, TxData, TxDataResult, TxType,
};
use alloc::vec::Vec;
use alloy_eips::eip2930::{AccessList, AccessListItem};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{BufMut, Decodable, Encodable, Header};

/// The transaction data of an [EIP-1559] dynamic fee transaction.
///
/// [EIP-1559]: https://eips.ethereum.org/EIPS/eip-1559
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxDynamicFee {
    /// Chain id the transaction is valid on.
    pub chain_id: U256,
    /// Nonce of the sender account.
    pub nonce: u64,
    /// Maximum priority fee per gas paid to the block producer.
    pub gas_tip_cap: U256,
    /// Maximum total fee per gas, base fee included.
    pub gas_fee_cap: U256,
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

impl TxDynamicFee {
    fn unsigned_fields_len(&self) -> usize {
        self.chain_id.length()
            + self.nonce.length()
            + self.gas_tip_cap.length()
            + self.gas_fee_cap.length()
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
        self.gas_tip_cap.encode(out);
        self.gas_fee_cap.encode(out);
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
            gas_tip_cap: Decodable::decode(buf)?,
            gas_fee_cap: Decodable::decode(buf)?,
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

    /// Returns the hash the sender signed over: `keccak256(0x02 || rlp(unsigned fields))`.
    pub fn signature_hash(&self) -> B256 {
        let payload_length = self.unsigned_fields_len();
        let mut buf = Vec::with_capacity(payload_length + 10);
        buf.put_u8(TxType::DynamicFee as u8);
        Header { list: true, payload_length }.encode(&mut buf);
        self.encode_unsigned_fields(&mut buf);
        keccak256(&buf)
    }
}

impl TxData for TxDynamicFee {
    fn tx_type(&self) -> TxType {
        TxType::DynamicFee
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
        self.gas_fee_cap
    }

    fn gas_tip_cap(&self) -> U256 {
        self.gas_tip_cap
    }

    fn gas_fee_cap(&self) -> U256 {
        self.gas_fee_cap
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

    /// `min(tip_cap + base_fee, fee_cap)`, or the fee cap when there is no base fee.
    fn effective_gas_price<'a>(&self, dst: &'a mut U256, base_fee: Option<U256>) -> &'a U256 {
        *dst = match base_fee {
            Some(base_fee) => {
                self.gas_tip_cap.saturating_add(base_fee).min(self.gas_fee_cap)
            }
            None => self.gas_fee_cap,
        };
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
            gas_tip_cap: self.gas_tip_cap,
            gas_fee_cap: self.gas_fee_cap,
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

impl Encodable for TxDynamicFee {
    fn encode(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.fields_len() }.encode(out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.fields_len();
        alloy_rlp::length_of_length(payload_length) + payload_length
    }
}

impl Decodable for TxDynamicFee {
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

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::address;
    use proptest::{prelude::any, proptest};

    fn dynamic_fee_tx() -> TxDynamicFee {
        TxDynamicFee {
            chain_id: U256::from(1),
            nonce: 0x42,
            gas_tip_cap: U256::from(2),
            gas_fee_cap: U256::from(100),
            gas: 44_386,
            to: Some(address!("6069a6c32cf691f5982febae4faf8a6f3ab2f0f6")),
            value: U256::ZERO,
            data: Bytes::from_static(&[0xa2, 0x2c, 0xb4, 0x65]),
            access_list: AccessList::default(),
            v: U256::ZERO,
            r: U256::from(0x1234),
            s: U256::from(0x5678),
        }
    }

    #[test]
    fn test_encode_decode_dynamic_fee_tx() {
        let tx = dynamic_fee_tx();
        let mut buf = Vec::new();
        TxData::encode(&tx, &mut buf).unwrap();
        assert_eq!(buf.len(), Encodable::length(&tx));
        assert_eq!(<TxDynamicFee as TxData>::decode(&mut buf.as_slice()).unwrap(), tx);
    }

    #[test]
    fn test_decode_trailing_field_rejected() {
        let tx = dynamic_fee_tx();
        let mut fields = Vec::new();
        tx.encode_fields(&mut fields);
        0u8.encode(&mut fields);

        let mut buf = Vec::new();
        Header { list: true, payload_length: fields.len() }.encode(&mut buf);
        buf.extend_from_slice(&fields);

        assert!(matches!(
            <TxDynamicFee as TxData>::decode(&mut buf.as_slice()),
            Err(crate::TxDataError::Rlp(alloy_rlp::Error::ListLengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_fee_accessors() {
        let tx = dynamic_fee_tx();
        assert_eq!(tx.gas_price(), U256::from(100));
        assert_eq!(tx.gas_tip_cap(), U256::from(2));
        assert_eq!(tx.gas_fee_cap(), U256::from(100));
    }

    #[test]
    fn test_effective_gas_price() {
        let tx = dynamic_fee_tx();
        let mut dst = U256::ZERO;

        // Tip plus base fee below the cap.
        tx.effective_gas_price(&mut dst, Some(U256::from(10)));
        assert_eq!(dst, U256::from(12));

        // Capped by the fee cap.
        tx.effective_gas_price(&mut dst, Some(U256::from(99)));
        assert_eq!(dst, U256::from(100));

        // No base fee.
        tx.effective_gas_price(&mut dst, None);
        assert_eq!(dst, U256::from(100));
    }

    proptest! {
        #[test]
        fn test_effective_gas_price_never_exceeds_cap(
            tip in any::<u64>(),
            cap in any::<u64>(),
            base_fee in any::<u64>(),
        ) {
            let tx = TxDynamicFee {
                gas_tip_cap: U256::from(tip),
                gas_fee_cap: U256::from(cap),
                ..dynamic_fee_tx()
            };
            let mut dst = U256::MAX;
            let price = *tx.effective_gas_price(&mut dst, Some(U256::from(base_fee)));
            assert!(price <= U256::from(cap));
            assert_eq!(price, dst);
        }
    }
}
