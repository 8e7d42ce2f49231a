//! Signature component helpers shared by all transaction variants.

use crate::{TxDataError, TxDataResult, TxType};
use alloy_primitives::U256;

/// The raw `(V, R, S)` signature components of a transaction.
///
/// `V` is kept in its on-chain form: `27`/`28` or `35 + 2 * chain_id + y_parity` for legacy
/// shaped transactions, and the bare y-parity (`0`/`1`) for typed transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawSignature {
    /// The recovery component.
    pub v: U256,
    /// The `r` component.
    pub r: U256,
    /// The `s` component.
    pub s: U256,
}

impl RawSignature {
    /// Creates a new [RawSignature] from its components.
    pub const fn new(v: U256, r: U256, s: U256) -> Self {
        Self { v, r, s }
    }
}

impl From<(U256, U256, U256)> for RawSignature {
    fn from((v, r, s): (U256, U256, U256)) -> Self {
        Self { v, r, s }
    }
}

/// Derives the chain id encoded into a legacy `V` value.
///
/// EIP-155: `V = 35 + 2 * chain_id + y_parity`. Unprotected values (`27`/`28`) carry no chain id
/// and derive zero, as does any other value below `35`.
pub fn derive_chain_id(v: U256) -> U256 {
    if !is_protected_v(v) {
        return U256::ZERO;
    }
    v.saturating_sub(U256::from(35)) / U256::from(2)
}

/// Returns `true` if the legacy `V` value carries an EIP-155 chain id.
pub fn is_protected_v(v: U256) -> bool {
    v != U256::from(27) && v != U256::from(28) && v >= U256::from(35)
}

/// Computes the EIP-155 `V` value for the given chain id and y-parity.
pub fn eip155_v(chain_id: U256, y_parity: bool) -> U256 {
    U256::from(35) + chain_id * U256::from(2) + U256::from(y_parity as u8)
}

/// Converts a `V` value to the signature's y-parity, according to the transaction type.
pub fn convert_v_to_y_parity(v: U256, tx_type: TxType) -> TxDataResult<bool> {
    match tx_type {
        TxType::Legacy | TxType::Combo => {
            if is_protected_v(v) {
                // EIP-155: v = 2 * chain_id + 35 + yParity
                Ok((v - U256::from(35)).bit(0))
            } else if v == U256::from(27) || v == U256::from(28) {
                Ok(v == U256::from(28))
            } else {
                Err(TxDataError::InvalidV(v))
            }
        }
        TxType::AccessList | TxType::DynamicFee => {
            if v > U256::from(1) {
                return Err(TxDataError::InvalidV(v));
            }
            Ok(v == U256::from(1))
        }
    }
}
