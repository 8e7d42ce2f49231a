//! This module contains the [SignedRecoverable] trait.
//!
//! Imported [ComboTx]s carry their sender as reported by the source record and never go through
//! signature recovery. All other variants recover the sender from their signature when the `k256`
//! feature is enabled.

use crate::{ComboTx, TxDataError, TxDataResult};
use alloy_primitives::Address;

#[cfg(feature = "k256")]
use crate::{
    convert_v_to_y_parity, RawSignature, TxAccessList, TxData, TxDynamicFee, TxEnvelope,
    TxLegacy, TxType,
};
#[cfg(feature = "k256")]
use alloy_primitives::{Signature, B256};

/// Represents a transaction whose sender can be determined.
pub trait SignedRecoverable {
    /// Returns the address of the account that sent the transaction.
    fn recover_sender(&self) -> TxDataResult<Address>;
}

impl SignedRecoverable for ComboTx {
    fn recover_sender(&self) -> TxDataResult<Address> {
        self.sender().ok_or(TxDataError::MissingSender)
    }
}

#[cfg(feature = "k256")]
impl SignedRecoverable for TxLegacy {
    fn recover_sender(&self) -> TxDataResult<Address> {
        recover_sender(TxType::Legacy, self.raw_signature_values(), &self.signature_hash())
    }
}

#[cfg(feature = "k256")]
impl SignedRecoverable for TxAccessList {
    fn recover_sender(&self) -> TxDataResult<Address> {
        recover_sender(TxType::AccessList, self.raw_signature_values(), &self.signature_hash())
    }
}

#[cfg(feature = "k256")]
impl SignedRecoverable for TxDynamicFee {
    fn recover_sender(&self) -> TxDataResult<Address> {
        recover_sender(TxType::DynamicFee, self.raw_signature_values(), &self.signature_hash())
    }
}

#[cfg(feature = "k256")]
impl SignedRecoverable for TxEnvelope {
    fn recover_sender(&self) -> TxDataResult<Address> {
        match self {
            Self::Legacy(tx) => tx.recover_sender(),
            Self::AccessList(tx) => tx.recover_sender(),
            Self::DynamicFee(tx) => tx.recover_sender(),
            Self::Combo(tx) => tx.recover_sender(),
        }
    }
}

/// Recovers the sender from a signature and the hash it signed over.
#[cfg(feature = "k256")]
#[inline]
fn recover_sender(
    tx_type: TxType,
    signature: RawSignature,
    message_hash: &B256,
) -> TxDataResult<Address> {
    let y_parity = convert_v_to_y_parity(signature.v, tx_type)?;
    let sig = Signature::from_rs_and_parity(signature.r, signature.s, y_parity)?;
    Ok(sig.recover_address_from_prehash(message_hash)?)
}
