use newcmd_primitives::{B256, keccak256};

use crate::Request;

/// Returns the bytes whose hash is signed to authorize `request`.
///
/// - legacy: `rlp([nonce, gasPrice, gas, to, value, data])`
/// - EIP-155 legacy: `rlp([nonce, gasPrice, gas, to, value, data, chainId, 0,
///   0])`
/// - typed: `type || rlp([chainId, ..., accessList])`
pub fn signing_preimage(request: &Request) -> Vec<u8> {
    let mut preimage = Vec::new();
    request.encode_unsigned(&mut preimage);
    preimage
}

/// Computes the digest that must be signed to authorize `request`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn signing_digest(request: &Request) -> B256 {
    let preimage = signing_preimage(request);

    log::debug!(
        "Computing {:?} signing digest (chain ID: {:?}) over {} bytes",
        request.transaction_type(),
        request.chain_id().map(u64::from),
        preimage.len()
    );

    keccak256(preimage)
}
