//! Errors for the `kona-tx-data` crate.

use crate::TxType;
use alloy_primitives::{SignatureError, U256};
use core::fmt;
use thiserror::Error;

/// A [Result] type alias where the error is [TxDataError].
pub type TxDataResult<T> = Result<T, TxDataError>;

/// An operation on [TxData] that a variant may refuse.
///
/// [TxData]: crate::TxData
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxDataOp {
    /// Self-serialization into the binary format.
    Encode,
    /// Self-deserialization from the binary format.
    Decode,
    /// Computing the transaction hash from its encoding.
    Hash,
    /// Computing the hash the sender signed over.
    SignatureHash,
}

impl fmt::Display for TxDataOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "encode"),
            Self::Decode => write!(f, "decode"),
            Self::Hash => write!(f, "hash"),
            Self::SignatureHash => write!(f, "signature hash"),
        }
    }
}

/// An error type for [TxData] and [TxEnvelope] operations.
///
/// [TxData]: crate::TxData
/// [TxEnvelope]: crate::TxEnvelope
#[derive(Error, Debug)]
pub enum TxDataError {
    /// The operation is not supported by the transaction variant. Reaching this is a logic
    /// error at the call site.
    #[error("{op} called on {tx_type} transaction")]
    Unsupported {
        /// The variant the operation was attempted on.
        tx_type: TxType,
        /// The refused operation.
        op: TxDataOp,
    },
    /// Unknown EIP-2718 transaction type byte.
    #[error("Unexpected transaction type: {0}")]
    UnexpectedType(u8),
    /// No bytes were provided to decode.
    #[error("Cannot decode a transaction from empty input")]
    EmptyInput,
    /// Failed to RLP decode transaction fields.
    #[error("RLP error: {0}")]
    Rlp(alloy_rlp::Error),
    /// The signature `V` value cannot be mapped to a y-parity.
    #[error("Invalid signature V value: {0}")]
    InvalidV(U256),
    /// Signature construction or recovery failed.
    #[error("Signature error: {0}")]
    Signature(SignatureError),
    /// An imported transaction was attached without a pre-recovered sender.
    #[error("Imported transaction is missing its sender")]
    MissingSender,
}

impl From<alloy_rlp::Error> for TxDataError {
    fn from(err: alloy_rlp::Error) -> Self {
        Self::Rlp(err)
    }
}

impl From<SignatureError> for TxDataError {
    fn from(err: SignatureError) -> Self {
        Self::Signature(err)
    }
}
