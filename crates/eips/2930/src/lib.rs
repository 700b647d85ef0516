// Part of this code was adapted from ethers-rs and is distributed under their
// license:
// - https://github.com/gakonst/ethers-rs/blob/cba6f071aedafb766e82e4c2f469ed5e4638337d/LICENSE-APACHE
// - https://github.com/gakonst/ethers-rs/blob/cba6f071aedafb766e82e4c2f469ed5e4638337d/LICENSE-MIT
// For the original context see: https://github.com/gakonst/ethers-rs/blob/3d9c3290d42b77c510e5b5d0b6f7a2f72913bfff/ethers-core/src/types/transaction/eip2930.rs

//! Access lists of EIP-2930, shared by access list and dynamic fee
//! transactions.

use alloy_rlp::{RlpDecodable, RlpDecodableWrapper, RlpEncodable, RlpEncodableWrapper};
use newcmd_primitives::{Address, B256};

/// Access list
// NB: Need to use `RlpEncodableWrapper` else we get an extra [] in the output
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    RlpDecodableWrapper,
    RlpEncodableWrapper,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct AccessList(pub Vec<AccessListItem>);

/// An address and the storage slots a transaction pre-declares it will touch.
///
/// Storage keys are 256-bit words that are always encoded at their full width
/// of 32 bytes.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    RlpDecodable,
    RlpEncodable,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItem {
    /// Accessed address
    pub address: Address,
    /// Accessed storage keys
    pub storage_keys: Vec<B256>,
}
