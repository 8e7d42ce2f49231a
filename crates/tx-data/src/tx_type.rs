//! Contains the [TxType] tag shared by all transaction variants.

use crate::TxDataError;
use core::fmt;

/// Transaction type flags as specified in [EIP-2718], [EIP-2930] and [EIP-1559], plus the
/// [ComboTx] tag.
///
/// The combo tag is never written to the wire: a [ComboTx] has no self-describing encoding and
/// is reconstructed from the record it was imported from.
///
/// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
/// [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930
/// [EIP-1559]: https://eips.ethereum.org/EIPS/eip-1559
/// [ComboTx]: crate::ComboTx
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub enum TxType {
    /// Legacy transaction type.
    #[default]
    Legacy = 0,
    /// EIP-2930 access list transaction type.
    AccessList = 1,
    /// EIP-1559 dynamic fee transaction type.
    DynamicFee = 2,
    /// Imported combo transaction type.
    Combo = 0x7F,
}

impl TxType {
    /// Returns `true` if the type is framed with a leading type byte in EIP-2718 encodings.
    pub const fn is_typed(&self) -> bool {
        !matches!(self, Self::Legacy)
    }
}

impl From<TxType> for u8 {
    fn from(ty: TxType) -> Self {
        ty as Self
    }
}

impl TryFrom<u8> for TxType {
    type Error = TxDataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::AccessList),
            2 => Ok(Self::DynamicFee),
            0x7F => Ok(Self::Combo),
            _ => Err(TxDataError::UnexpectedType(value)),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::AccessList => write!(f, "access list"),
            Self::DynamicFee => write!(f, "dynamic fee"),
            Self::Combo => write!(f, "combo"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tx_type_roundtrip() {
        for ty in [TxType::Legacy, TxType::AccessList, TxType::DynamicFee, TxType::Combo] {
            assert_eq!(TxType::try_from(u8::from(ty)).unwrap(), ty);
        }
    }

    #[test]
    fn test_tx_type_unknown() {
        assert!(matches!(TxType::try_from(3), Err(TxDataError::UnexpectedType(3))));
        assert!(matches!(TxType::try_from(0x7E), Err(TxDataError::UnexpectedType(0x7E))));
    }

    #[test]
    fn test_is_typed() {
        assert!(!TxType::Legacy.is_typed());
        assert!(TxType::Combo.is_typed());
    }
}
