//! Contains the [TxData] trait, the capability set every transaction variant implements.

use crate::{RawSignature, TxDataResult, TxType};
use alloy_eips::eip2930::AccessListItem;
use alloy_primitives::{Address, U256};
use alloy_rlp::BufMut;
use core::fmt::Debug;

/// The uniform surface of a transaction variant.
///
/// Upper layers (signing, hashing, pooling, execution) only ever branch on the concrete variant
/// through [TxData::tx_type]. Every accessor is a pure read and never fails on a populated
/// instance: optional numeric fields that are absent read as zero.
///
/// [TxData::set_signature_values] is the only mutator beyond construction. It takes `&mut self`,
/// so a concurrent reader can never observe a partially replaced signature; sharing an instance
/// across threads requires the holder to lock around it.
pub trait TxData: Debug + Send + Sync {
    /// Returns the variant's fixed type tag.
    fn tx_type(&self) -> TxType;

    /// Returns the chain id. Zero means the transaction is not replay protected.
    fn chain_id(&self) -> U256;

    /// Returns the access list. Empty for variants that predate [EIP-2930].
    ///
    /// [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930
    fn access_list(&self) -> &[AccessListItem];

    /// Returns the call or deployment payload.
    fn data(&self) -> &[u8];

    /// Returns the gas limit.
    fn gas(&self) -> u64;

    /// Returns the gas price. Dynamic fee variants return their fee cap.
    fn gas_price(&self) -> U256;

    /// Returns the maximum priority fee per gas.
    fn gas_tip_cap(&self) -> U256;

    /// Returns the maximum fee per gas.
    fn gas_fee_cap(&self) -> U256;

    /// Returns the value transferred to the recipient.
    fn value(&self) -> U256;

    /// Returns the sender's nonce.
    fn nonce(&self) -> u64;

    /// Returns the recipient. `None` means contract creation.
    fn to(&self) -> Option<Address>;

    /// Writes the gas price actually paid into `dst` and returns it.
    ///
    /// `base_fee` is the block's base fee, if the block has one. Variants without fee market
    /// fields ignore it.
    fn effective_gas_price<'a>(&self, dst: &'a mut U256, base_fee: Option<U256>) -> &'a U256;

    /// Returns the raw `(V, R, S)` signature values.
    fn raw_signature_values(&self) -> RawSignature;

    /// Replaces the signature values as a unit. Typed variants also store `chain_id`.
    fn set_signature_values(&mut self, chain_id: U256, v: U256, r: U256, s: U256);

    /// Returns a new instance that shares no storage with `self`.
    fn deep_copy(&self) -> Self
    where
        Self: Sized;

    /// RLP encodes the variant's fields into `out`.
    fn encode(&self, out: &mut dyn BufMut) -> TxDataResult<()>;

    /// RLP decodes a variant from `buf`, advancing it past the consumed bytes.
    fn decode(buf: &mut &[u8]) -> TxDataResult<Self>
    where
        Self: Sized;
}
