//! Utilities for `kona-tx-data`

use alloy_primitives::{Address, Bytes, TxKind, B256};
use alloy_rlp::{BufMut, Decodable, Encodable};

/// Duplicates an optional address.
#[inline]
pub fn copy_address(addr: Option<&Address>) -> Option<Address> {
    addr.copied()
}

/// Duplicates an optional hash.
#[inline]
pub fn copy_hash(hash: Option<&B256>) -> Option<B256> {
    hash.copied()
}

/// Duplicates a payload into freshly allocated storage.
///
/// [Bytes] clones share their backing buffer; this does not.
#[inline]
pub fn copy_bytes(bytes: &[u8]) -> Bytes {
    Bytes::copy_from_slice(bytes)
}

/// RLP length of an optional recipient. `None` is the empty string.
pub(crate) fn to_length(to: Option<&Address>) -> usize {
    TxKind::from(to.copied()).length()
}

/// RLP encodes an optional recipient. `None` is written as the empty string (`0x80`).
pub(crate) fn encode_to(to: Option<&Address>, out: &mut dyn BufMut) {
    TxKind::from(to.copied()).encode(out)
}

/// RLP decodes an optional recipient.
pub(crate) fn decode_to(buf: &mut &[u8]) -> alloy_rlp::Result<Option<Address>> {
    Ok(TxKind::decode(buf)?.to().copied())
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::vec::Vec;
    use alloy_primitives::address;

    #[test]
    fn test_copy_bytes_new_storage() {
        let original = Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]);
        let copy = copy_bytes(&original);
        assert_eq!(copy, original);
        assert_ne!(copy.as_ptr(), original.as_ptr());
    }

    #[test]
    fn test_copy_address() {
        let addr = address!("00000000000000000000000000000000000000aa");
        assert_eq!(copy_address(Some(&addr)), Some(addr));
        assert_eq!(copy_address(None), None);
    }

    #[test]
    fn test_create_encodes_empty_string() {
        let mut buf = Vec::new();
        encode_to(None, &mut buf);
        assert_eq!(buf, [alloy_rlp::EMPTY_STRING_CODE]);
        assert_eq!(to_length(None), 1);
        assert_eq!(decode_to(&mut buf.as_slice()).unwrap(), None);
    }

    #[test]
    fn test_call_roundtrip() {
        let addr = address!("00000000000000000000000000000000000000bb");
        let mut buf = Vec::new();
        encode_to(Some(&addr), &mut buf);
        assert_eq!(buf.len(), to_length(Some(&addr)));
        assert_eq!(decode_to(&mut buf.as_slice()).unwrap(), Some(addr));
    }
}
