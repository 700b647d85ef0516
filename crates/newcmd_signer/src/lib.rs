// Part of this code was adapted from ethers-rs and is distributed under their
// licenss:
// - https://github.com/gakonst/ethers-rs/blob/cba6f071aedafb766e82e4c2f469ed5e4638337d/LICENSE-APACHE
// - https://github.com/gakonst/ethers-rs/blob/cba6f071aedafb766e82e4c2f469ed5e4638337d/LICENSE-MIT
// For the original context see: https://github.com/gakonst/ethers-rs/blob/cba6f071aedafb766e82e4c2f469ed5e4638337d/ethers-core/src/types/signature.rs

//! secp256k1 signing, public key recovery and address derivation.

mod key_store;
mod recovery;
mod signature;

pub use k256::{PublicKey, SecretKey};
use k256::{FieldBytes, elliptic_curve::sec1::ToEncodedPoint};
use newcmd_primitives::Address;
use sha3::{Digest, Keccak256};

pub use self::{
    key_store::{InMemoryKeyStore, KeyStore, KeyStoreError},
    recovery::{
        RecoveryId, SECP256K1_HALF_ORDER, SECP256K1_ORDER, recover_public_key, validate_low_s,
        validate_signature_values,
    },
    signature::{RecoverableSignature, SIGNATURE_LENGTH},
};

/// A signature value outside of its valid range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSignatureValue {
    /// `r` is zero or not below the curve order.
    #[error("r must be positive and below the curve order")]
    R,
    /// `s` is zero, not below the curve order, or above half the curve order
    /// where a low `s` is required.
    #[error("s must be positive and below the curve order, at most half of it for transactions")]
    S,
    /// The recovery ID is neither 0 nor 1.
    #[error("recovery ID must be 0 or 1, got {0}")]
    RecoveryId(u64),
}

/// An error involving a signature.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// One of the signature values is out of range.
    #[error("Invalid signature values: {0}")]
    InvalidSignatureValues(#[from] InvalidSignatureValue),
    /// Invalid length, ECDSA secp256k1 signatures with recovery are 65 bytes
    #[error("invalid signature length, got {0}, expected 65")]
    InvalidLength(usize),
    /// Invalid secret key.
    #[error("Expected 32 byte secret key")]
    InvalidSecretKeyLength,
    /// When parsing a secret key from string to hex
    #[error("Invalid hex")]
    InvalidSecretKeyHex,
    /// ECDSA error
    #[error(transparent)]
    ECDSAError(#[from] k256::ecdsa::signature::Error),
    /// Elliptic curve error
    #[error(transparent)]
    EllipticCurveError(#[from] k256::elliptic_curve::Error),
}

/// Serializes a [`PublicKey`] in uncompressed SEC1 form: `0x04 || x || y`.
pub fn public_key_to_bytes(public_key: &PublicKey) -> Vec<u8> {
    public_key
        .to_encoded_point(/* compress = */ false)
        .as_bytes()
        .to_vec()
}

/// Converts a [`PublicKey`] to an [`Address`].
pub fn public_key_to_address(public_key: PublicKey) -> Address {
    let public_key = public_key.to_encoded_point(/* compress = */ false);
    // First byte is header value
    let pk_bytes = public_key
        .as_bytes()
        .get(1..)
        .expect("uncompressed public key is 65 bytes");
    let hash = Keccak256::digest(pk_bytes);
    // Only take the lower 160 bits of the hash
    let hash_slice = hash.get(12..).expect("hash is 32 bytes");
    Address::from_slice(hash_slice)
}

/// Returns the address that belongs to a secret key.
pub fn secret_key_to_address(secret_key: &SecretKey) -> Address {
    public_key_to_address(secret_key.public_key())
}

/// It's dangerous to represent secret keys as native string types, because the
/// native string types have debug, display and serialization implementations
/// that can result in the secrets accidentally leaking to logs. It's marked as
/// deprecated, because it should be only created in exactly one place in the
/// production code.
#[deprecated]
pub struct DangerousSecretKeyStr<'a>(pub &'a str);

// It's marked as deprecated to be thoughtful abouts its usage.
#[allow(deprecated)]
/// Converts a hex string to a secret key.
pub fn secret_key_from_str(
    secret_key: DangerousSecretKeyStr<'_>,
) -> Result<SecretKey, SignatureError> {
    #[allow(deprecated)]
    let str_key = secret_key.0.trim();
    let secret_key = hex::decode(str_key.strip_prefix("0x").unwrap_or(str_key))
        // Hex error can leak character, so use opaque one.
        .map_err(|_err| SignatureError::InvalidSecretKeyHex)?;
    let secret_key = FieldBytes::from_exact_iter(secret_key.into_iter())
        .ok_or(SignatureError::InvalidSecretKeyLength)?;
    SecretKey::from_bytes(&secret_key).map_err(SignatureError::EllipticCurveError)
}
