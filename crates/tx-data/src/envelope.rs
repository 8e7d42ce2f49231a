//! Contains the [TxEnvelope], the closed sum over all transaction variants.

use crate::{
    ComboTx, RawSignature, TxAccessList, TxData, TxDataError, TxDataOp, TxDataResult,
    TxDynamicFee, TxLegacy, TxType,
};
use alloc::vec::Vec;
use alloy_eips::eip2930::AccessListItem;
use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_rlp::{BufMut, Encodable};

/// Holds exactly one transaction variant and dispatches [TxData] calls to it.
///
/// Framing follows [EIP-2718]: legacy transactions are a bare RLP list, typed transactions are
/// prefixed with their type byte. A [ComboTx] never crosses this boundary as bytes; it is
/// reconstructed from the record it was imported from.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEnvelope {
    /// A [TxLegacy].
    Legacy(TxLegacy),
    /// A [TxAccessList].
    AccessList(TxAccessList),
    /// A [TxDynamicFee].
    DynamicFee(TxDynamicFee),
    /// A [ComboTx].
    Combo(ComboTx),
}

impl From<TxLegacy> for TxEnvelope {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxAccessList> for TxEnvelope {
    fn from(tx: TxAccessList) -> Self {
        Self::AccessList(tx)
    }
}

impl From<TxDynamicFee> for TxEnvelope {
    fn from(tx: TxDynamicFee) -> Self {
        Self::DynamicFee(tx)
    }
}

impl From<ComboTx> for TxEnvelope {
    fn from(tx: ComboTx) -> Self {
        Self::Combo(tx)
    }
}

impl TxEnvelope {
    /// Returns the inner [TxData].
    pub fn inner(&self) -> &dyn TxData {
        match self {
            Self::Legacy(tx) => tx,
            Self::AccessList(tx) => tx,
            Self::DynamicFee(tx) => tx,
            Self::Combo(tx) => tx,
        }
    }

    /// Returns the inner [ComboTx], if this is an imported transaction.
    pub const fn as_combo(&self) -> Option<&ComboTx> {
        match self {
            Self::Combo(tx) => Some(tx),
            _ => None,
        }
    }

    /// Returns `true` if the transaction is an imported [ComboTx].
    pub const fn is_combo(&self) -> bool {
        matches!(self, Self::Combo(_))
    }

    /// Encodes the transaction with its [EIP-2718] type prefix.
    ///
    /// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
    pub fn encode_2718(&self, out: &mut dyn BufMut) -> TxDataResult<()> {
        match self {
            Self::Legacy(tx) => TxData::encode(tx, out),
            Self::AccessList(tx) => {
                out.put_u8(TxType::AccessList as u8);
                TxData::encode(tx, out)
            }
            Self::DynamicFee(tx) => {
                out.put_u8(TxType::DynamicFee as u8);
                TxData::encode(tx, out)
            }
            Self::Combo(tx) => TxData::encode(tx, out).inspect_err(|e| {
                tracing::warn!(target: "tx-data", "refusing to encode imported transaction: {e}");
            }),
        }
    }

    /// Returns the [EIP-2718] encoding of the transaction.
    ///
    /// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
    pub fn encoded_2718(&self) -> TxDataResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encode_2718_len());
        self.encode_2718(&mut buf)?;
        Ok(buf)
    }

    /// Returns the length of the [EIP-2718] encoding. Zero for imported transactions.
    ///
    /// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
    pub fn encode_2718_len(&self) -> usize {
        match self {
            Self::Legacy(tx) => tx.length(),
            Self::AccessList(tx) => 1 + tx.length(),
            Self::DynamicFee(tx) => 1 + tx.length(),
            Self::Combo(_) => 0,
        }
    }

    /// Decodes an [EIP-2718] encoded transaction, advancing `buf` past it.
    ///
    /// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
    pub fn decode_2718(buf: &mut &[u8]) -> TxDataResult<Self> {
        let first = *buf.first().ok_or(TxDataError::EmptyInput)?;

        // A RLP list header means an untyped legacy transaction.
        if first >= alloy_rlp::EMPTY_LIST_CODE {
            tracing::debug!(target: "tx-data", "decoding legacy transaction");
            return Ok(Self::Legacy(<TxLegacy as TxData>::decode(buf)?));
        }

        let ty = TxType::try_from(first)?;
        tracing::debug!(target: "tx-data", "decoding {ty} transaction");
        match ty {
            TxType::AccessList => {
                *buf = &buf[1..];
                Ok(Self::AccessList(<TxAccessList as TxData>::decode(buf)?))
            }
            TxType::DynamicFee => {
                *buf = &buf[1..];
                Ok(Self::DynamicFee(<TxDynamicFee as TxData>::decode(buf)?))
            }
            TxType::Combo => {
                <ComboTx as TxData>::decode(buf).map(Self::Combo).inspect_err(|e| {
                    tracing::warn!(target: "tx-data", "refusing to decode imported tx: {e}");
                })
            }
            TxType::Legacy => Err(TxDataError::UnexpectedType(first)),
        }
    }

    /// Returns the transaction hash.
    ///
    /// For imported transactions this is the hash reported by the source record, since their
    /// encoding cannot be reproduced.
    pub fn tx_hash(&self) -> TxDataResult<B256> {
        match self {
            Self::Combo(tx) => tx
                .tx_hash()
                .ok_or(TxDataError::Unsupported { tx_type: TxType::Combo, op: TxDataOp::Hash }),
            _ => Ok(keccak256(self.encoded_2718()?)),
        }
    }

    /// Returns the hash the sender signed over.
    pub fn signature_hash(&self) -> TxDataResult<B256> {
        match self {
            Self::Legacy(tx) => Ok(tx.signature_hash()),
            Self::AccessList(tx) => Ok(tx.signature_hash()),
            Self::DynamicFee(tx) => Ok(tx.signature_hash()),
            Self::Combo(_) => Err(TxDataError::Unsupported {
                tx_type: TxType::Combo,
                op: TxDataOp::SignatureHash,
            }),
        }
    }
}

impl TxData for TxEnvelope {
    fn tx_type(&self) -> TxType {
        self.inner().tx_type()
    }

    fn chain_id(&self) -> U256 {
        self.inner().chain_id()
    }

    fn access_list(&self) -> &[AccessListItem] {
        self.inner().access_list()
    }

    fn data(&self) -> &[u8] {
        self.inner().data()
    }

    fn gas(&self) -> u64 {
        self.inner().gas()
    }

    fn gas_price(&self) -> U256 {
        self.inner().gas_price()
    }

    fn gas_tip_cap(&self) -> U256 {
        self.inner().gas_tip_cap()
    }

    fn gas_fee_cap(&self) -> U256 {
        self.inner().gas_fee_cap()
    }

    fn value(&self) -> U256 {
        self.inner().value()
    }

    fn nonce(&self) -> u64 {
        self.inner().nonce()
    }

    fn to(&self) -> Option<Address> {
        self.inner().to()
    }

    fn effective_gas_price<'a>(&self, dst: &'a mut U256, base_fee: Option<U256>) -> &'a U256 {
        self.inner().effective_gas_price(dst, base_fee)
    }

    fn raw_signature_values(&self) -> RawSignature {
        self.inner().raw_signature_values()
    }

    fn set_signature_values(&mut self, chain_id: U256, v: U256, r: U256, s: U256) {
        match self {
            Self::Legacy(tx) => tx.set_signature_values(chain_id, v, r, s),
            Self::AccessList(tx) => tx.set_signature_values(chain_id, v, r, s),
            Self::DynamicFee(tx) => tx.set_signature_values(chain_id, v, r, s),
            Self::Combo(tx) => tx.set_signature_values(chain_id, v, r, s),
        }
    }

    fn deep_copy(&self) -> Self {
        match self {
            Self::Legacy(tx) => Self::Legacy(tx.deep_copy()),
            Self::AccessList(tx) => Self::AccessList(tx.deep_copy()),
            Self::DynamicFee(tx) => Self::DynamicFee(tx.deep_copy()),
            Self::Combo(tx) => Self::Combo(tx.deep_copy()),
        }
    }

    fn encode(&self, out: &mut dyn BufMut) -> TxDataResult<()> {
        self.encode_2718(out)
    }

    fn decode(buf: &mut &[u8]) -> TxDataResult<Self> {
        Self::decode_2718(buf)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::{address, b256, hex, Bytes};

    fn legacy_tx() -> TxLegacy {
        TxLegacy {
            nonce: 9,
            gas_price: U256::from(20_000_000_000u64),
            gas: 21000,
            to: Some(address!("3535353535353535353535353535353535353535")),
            value: U256::from(1_000_000_000_000_000_000u64),
            data: Bytes::new(),
            v: U256::from(37),
            r: U256::from(1),
            s: U256::from(2),
        }
    }

    fn dynamic_fee_tx() -> TxDynamicFee {
        TxDynamicFee {
            chain_id: U256::from(10),
            nonce: 1,
            gas_tip_cap: U256::from(1),
            gas_fee_cap: U256::from(50),
            gas: 100_000,
            to: None,
            value: U256::ZERO,
            data: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]),
            v: U256::from(1),
            r: U256::from(3),
            s: U256::from(4),
            ..Default::default()
        }
    }

    fn combo_tx() -> ComboTx {
        ComboTx {
            nonce: 5,
            gas: 21000,
            gas_price: Some(U256::from(10)),
            value: Some(U256::from(100)),
            v: Some(U256::from(37)),
            r: Some(U256::from(1)),
            s: Some(U256::from(2)),
            hash: Some(b256!("2222222222222222222222222222222222222222222222222222222222222222")),
            ..Default::default()
        }
    }

    #[test]
    fn test_legacy_2718_roundtrip() {
        let envelope = TxEnvelope::from(legacy_tx());
        let encoded = envelope.encoded_2718().unwrap();
        assert!(encoded[0] >= alloy_rlp::EMPTY_LIST_CODE);
        assert_eq!(encoded.len(), envelope.encode_2718_len());

        let decoded = TxEnvelope::decode_2718(&mut encoded.as_slice()).unwrap();
        assert_eq!(decoded, envelope);
        assert_eq!(decoded.tx_type(), TxType::Legacy);
        assert_eq!(decoded.chain_id(), U256::from(1));
    }

    #[test]
    fn test_typed_2718_roundtrip() {
        let envelope = TxEnvelope::from(dynamic_fee_tx());
        let encoded = envelope.encoded_2718().unwrap();
        assert_eq!(encoded[0], TxType::DynamicFee as u8);

        let decoded = TxEnvelope::decode_2718(&mut encoded.as_slice()).unwrap();
        assert_eq!(decoded, envelope);
        assert_eq!(decoded.to(), None);
        assert_eq!(decoded.chain_id(), U256::from(10));
    }

    #[test]
    fn test_access_list_2718_roundtrip() {
        let envelope = TxEnvelope::from(TxAccessList {
            chain_id: U256::from(1),
            gas_price: U256::from(7),
            to: Some(address!("00000000000000000000000000000000000000cc")),
            ..Default::default()
        });
        let encoded = envelope.encoded_2718().unwrap();
        assert_eq!(encoded[0], TxType::AccessList as u8);
        assert_eq!(TxEnvelope::decode_2718(&mut encoded.as_slice()).unwrap(), envelope);
    }

    #[test]
    fn test_combo_encode_fails() {
        let envelope = TxEnvelope::from(combo_tx());
        assert!(matches!(
            envelope.encoded_2718(),
            Err(TxDataError::Unsupported { tx_type: TxType::Combo, op: TxDataOp::Encode })
        ));
        assert_eq!(envelope.encode_2718_len(), 0);
    }

    #[test]
    fn test_combo_type_byte_decode_fails() {
        let buf = [TxType::Combo as u8, 0xc0];
        assert!(matches!(
            TxEnvelope::decode_2718(&mut buf.as_slice()),
            Err(TxDataError::Unsupported { tx_type: TxType::Combo, op: TxDataOp::Decode })
        ));
    }

    #[test]
    fn test_decode_errors() {
        let mut empty: &[u8] = &[];
        assert!(matches!(TxEnvelope::decode_2718(&mut empty), Err(TxDataError::EmptyInput)));
        assert!(matches!(
            TxEnvelope::decode_2718(&mut hex!("03c0").as_slice()),
            Err(TxDataError::UnexpectedType(3))
        ));
        assert!(matches!(
            TxEnvelope::decode_2718(&mut hex!("00c0").as_slice()),
            Err(TxDataError::UnexpectedType(0))
        ));
    }

    #[test]
    fn test_tx_hash() {
        let envelope = TxEnvelope::from(legacy_tx());
        assert_eq!(envelope.tx_hash().unwrap(), keccak256(envelope.encoded_2718().unwrap()));

        let combo = TxEnvelope::from(combo_tx());
        assert_eq!(combo.tx_hash().unwrap(), combo_tx().hash.unwrap());

        let unhashed = TxEnvelope::from(ComboTx::default());
        assert!(matches!(
            unhashed.tx_hash(),
            Err(TxDataError::Unsupported { op: TxDataOp::Hash, .. })
        ));
    }

    #[test]
    fn test_signature_hash_dispatch() {
        let tx = legacy_tx();
        assert_eq!(TxEnvelope::from(tx.clone()).signature_hash().unwrap(), tx.signature_hash());
        assert!(matches!(
            TxEnvelope::from(combo_tx()).signature_hash(),
            Err(TxDataError::Unsupported { op: TxDataOp::SignatureHash, .. })
        ));
    }

    #[test]
    fn test_uniform_accessors() {
        let envelopes = [
            TxEnvelope::from(legacy_tx()),
            TxEnvelope::from(dynamic_fee_tx()),
            TxEnvelope::from(combo_tx()),
        ];
        for envelope in envelopes {
            let mut dst = U256::ZERO;
            let price = *envelope.effective_gas_price(&mut dst, Some(U256::from(5)));
            assert!(price <= envelope.gas_fee_cap());
            assert_eq!(envelope.tx_type(), envelope.inner().tx_type());
        }
    }

    #[test]
    fn test_set_signature_values_dispatch() {
        let mut envelope = TxEnvelope::from(combo_tx());
        envelope.set_signature_values(U256::ZERO, U256::from(28), U256::from(9), U256::from(9));
        assert_eq!(
            envelope.raw_signature_values(),
            RawSignature::new(U256::from(28), U256::from(9), U256::from(9))
        );
        assert_eq!(envelope.chain_id(), U256::ZERO);
    }

    #[test]
    fn test_deep_copy_dispatch() {
        let envelope = TxEnvelope::from(ComboTx { mint: Some(U256::from(1)), ..combo_tx() });
        let copy = envelope.deep_copy();
        assert!(copy.is_combo());
        assert_eq!(copy.as_combo().unwrap().mint, None);
        assert_eq!(copy.value(), envelope.value());
    }
}
