//! Primitive types shared by the `newcmd` crates.

mod chain_id;

pub use alloy_primitives::{
    Address, B64, B256, Bloom, Bytes, TxKind, U256, address, b256, bytes, hex, keccak256, uint,
};

pub use self::chain_id::{ChainId, ChainIdError, MAX_CHAIN_ID};
