#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod errors;
pub use errors::{TxDataError, TxDataOp, TxDataResult};

mod tx_type;
pub use tx_type::TxType;

mod traits;
pub use traits::TxData;

mod signature;
pub use signature::{
    convert_v_to_y_parity, derive_chain_id, eip155_v, is_protected_v, RawSignature,
};

mod util;
pub use util::{copy_address, copy_bytes, copy_hash};

mod legacy;
pub use legacy::TxLegacy;

mod access_list;
pub use access_list::TxAccessList;

mod dynamic_fee;
pub use dynamic_fee::TxDynamicFee;

mod combo;
pub use combo::ComboTx;

mod envelope;
pub use envelope::TxEnvelope;

mod ecrecover;
pub use ecrecover::SignedRecoverable;

/// The prelude exports common types and traits.
pub mod prelude {
    pub use crate::{
        ComboTx, RawSignature, SignedRecoverable, TxAccessList, TxData, TxDataError,
        TxDataResult, TxDynamicFee, TxEnvelope, TxLegacy, TxType,
    };
}
