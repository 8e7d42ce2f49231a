//! Contains the [ComboTx] transaction data type.

use crate::{
    copy_address, copy_bytes, derive_chain_id, RawSignature, TxData, TxDataError, TxDataOp,
    TxDataResult, TxType,
};
use alloy_eips::eip2930::AccessListItem;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_rlp::BufMut;

/// An already executed transaction imported from an external record, such as an L1 deposit or
/// a block imported from another chain.
///
/// Besides the legacy transaction fields it carries where the transaction was placed, the sender
/// and hash as reported by the source, the source record's hash and the value minted to the
/// sender. A [ComboTx] has no encoding of its own: [TxData::encode] and [TxData::decode] always
/// fail with [TxDataError::Unsupported].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ComboTx {
    /// Hash of the block the transaction was included in. `None` if not yet attached.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub block_hash: Option<B256>,
    /// Number of the block the transaction was included in.
    #[cfg_attr(feature = "serde", serde(default, with = "alloy_serde::quantity"))]
    pub block_number: u64,
    /// Sender as recovered by the source. Used in place of signature recovery.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub from: Option<Address>,
    /// Nonce of the sender account.
    #[cfg_attr(feature = "serde", serde(default, with = "alloy_serde::quantity"))]
    pub nonce: u64,
    /// Wei paid per unit of gas. `None` if the source did not report one; reads as zero.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub gas_price: Option<U256>,
    /// Gas limit.
    #[cfg_attr(feature = "serde", serde(default, with = "alloy_serde::quantity"))]
    pub gas: u64,
    /// Transaction hash as computed by the source.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub hash: Option<B256>,
    /// Raw input as reported by the source record.
    #[cfg_attr(feature = "serde", serde(default))]
    pub input: Bytes,
    /// Position of the transaction within its block.
    #[cfg_attr(feature = "serde", serde(default, with = "alloy_serde::quantity"))]
    pub transaction_index: u64,
    /// Recipient, or `None` for contract creation. Carried over, never interpreted here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub to: Option<Address>,
    /// Wei transferred to the recipient. `None` if absent at the source; reads as zero.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<U256>,
    /// Contract invocation input data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Bytes,
    /// Signature recovery value. `None` if unsigned; reads as zero.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub v: Option<U256>,
    /// Signature `r` value. `None` if unsigned; reads as zero.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub r: Option<U256>,
    /// Signature `s` value. `None` if unsigned; reads as zero.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub s: Option<U256>,
    /// Hash that uniquely identifies the record the transaction was imported from.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub source_hash: Option<B256>,
    /// Wei credited to the sender by the source, independent of `value`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mint: Option<U256>,
}

impl ComboTx {
    /// Returns the sender reported by the source record.
    pub const fn sender(&self) -> Option<Address> {
        self.from
    }

    /// Returns the transaction hash reported by the source record.
    pub const fn tx_hash(&self) -> Option<B256> {
        self.hash
    }

    /// Returns `true` if the transaction has been attached to a block.
    pub const fn is_attached(&self) -> bool {
        self.block_hash.is_some()
    }

    /// Returns the minted value, zero if none was credited.
    pub fn mint_value(&self) -> U256 {
        self.mint.unwrap_or_default()
    }

    const fn unsupported(op: TxDataOp) -> TxDataError {
        TxDataError::Unsupported { tx_type: TxType::Combo, op }
    }
}

impl TxData for ComboTx {
    fn tx_type(&self) -> TxType {
        TxType::Combo
    }

    fn chain_id(&self) -> U256 {
        derive_chain_id(self.v.unwrap_or_default())
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
        self.gas_price.unwrap_or_default()
    }

    fn gas_tip_cap(&self) -> U256 {
        self.gas_price()
    }

    fn gas_fee_cap(&self) -> U256 {
        self.gas_price()
    }

    fn value(&self) -> U256 {
        self.value.unwrap_or_default()
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn to(&self) -> Option<Address> {
        self.to
    }

    fn effective_gas_price<'a>(&self, dst: &'a mut U256, _: Option<U256>) -> &'a U256 {
        *dst = self.gas_price();
        dst
    }

    fn raw_signature_values(&self) -> RawSignature {
        RawSignature::new(
            self.v.unwrap_or_default(),
            self.r.unwrap_or_default(),
            self.s.unwrap_or_default(),
        )
    }

    fn set_signature_values(&mut self, _: U256, v: U256, r: U256, s: U256) {
        (self.v, self.r, self.s) = (Some(v), Some(r), Some(s));
    }

    /// Copies the business fields. Absent numbers become `Some(0)`.
    ///
    /// Provenance (`block_hash`, `block_number`, `transaction_index`, `from`, `hash`, `input`,
    /// `source_hash`, `mint`) is not carried over and is left at its default. Use [Clone] to keep
    /// it.
    fn deep_copy(&self) -> Self {
        Self {
            nonce: self.nonce,
            to: copy_address(self.to.as_ref()),
            data: copy_bytes(&self.data),
            gas: self.gas,
            value: Some(self.value.unwrap_or_default()),
            gas_price: Some(self.gas_price.unwrap_or_default()),
            v: Some(self.v.unwrap_or_default()),
            r: Some(self.r.unwrap_or_default()),
            s: Some(self.s.unwrap_or_default()),
            ..Default::default()
        }
    }

    fn encode(&self, _: &mut dyn BufMut) -> TxDataResult<()> {
        Err(Self::unsupported(TxDataOp::Encode))
    }

    fn decode(_: &mut &[u8]) -> TxDataResult<Self> {
        Err(Self::unsupported(TxDataOp::Decode))
    }
}
