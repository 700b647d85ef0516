use k256::{
    PublicKey,
    ecdsa::{Signature as ECDSASignature, VerifyingKey},
};
use newcmd_primitives::{B256, U256, uint};

use crate::{InvalidSignatureValue, SignatureError};

/// The order `n` of the secp256k1 curve.
pub const SECP256K1_ORDER: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// `n / 2`, the largest `s` value of a transaction signature since Homestead.
pub const SECP256K1_HALF_ORDER: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// Parity of the `y` coordinate of the signature's ephemeral point, selecting
/// one of the two public keys that can produce a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecoveryId(bool);

impl RecoveryId {
    /// Constructs a recovery ID from the `y` parity.
    pub const fn from_y_parity(odd_y_parity: bool) -> Self {
        Self(odd_y_parity)
    }

    /// Returns the recovery ID of the signature with the negated `s`.
    const fn flipped(self) -> Self {
        Self(!self.0)
    }

    /// Returns the recovery ID as 0 or 1.
    pub fn to_u8(self) -> u8 {
        u8::from(self.0)
    }
}

impl TryFrom<u64> for RecoveryId {
    type Error = InvalidSignatureValue;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self(false)),
            1 => Ok(Self(true)),
            value => Err(InvalidSignatureValue::RecoveryId(value)),
        }
    }
}

impl From<RecoveryId> for u64 {
    fn from(value: RecoveryId) -> Self {
        u64::from(value.to_u8())
    }
}

impl From<RecoveryId> for k256::ecdsa::RecoveryId {
    fn from(value: RecoveryId) -> Self {
        k256::ecdsa::RecoveryId::new(value.0, /* is_x_reduced = */ false)
    }
}

/// Validates that both `r` and `s` lie in `[1, n)`.
pub fn validate_signature_values(r: U256, s: U256) -> Result<(), InvalidSignatureValue> {
    if r.is_zero() || r >= SECP256K1_ORDER {
        return Err(InvalidSignatureValue::R);
    }

    if s.is_zero() || s >= SECP256K1_ORDER {
        return Err(InvalidSignatureValue::S);
    }

    Ok(())
}

/// Validates that `s` lies in the lower half of the curve order, as required
/// for transaction signatures since Homestead.
pub fn validate_low_s(s: U256) -> Result<(), InvalidSignatureValue> {
    if s > SECP256K1_HALF_ORDER {
        return Err(InvalidSignatureValue::S);
    }

    Ok(())
}

/// Recovers the public key that produced the signature `(r, s)` over
/// `digest`.
///
/// Both halves of the curve order are accepted for `s`.
pub fn recover_public_key(
    digest: &B256,
    r: U256,
    s: U256,
    recovery_id: RecoveryId,
) -> Result<PublicKey, SignatureError> {
    validate_signature_values(r, s)?;

    // `(r, n - s)` with the opposite parity recovers the same key, and k256
    // only accepts the low form.
    let (s, recovery_id) = if s > SECP256K1_HALF_ORDER {
        (SECP256K1_ORDER - s, recovery_id.flipped())
    } else {
        (s, recovery_id)
    };

    let signature = {
        let mut bytes = [0u8; 64];
        let (r_bytes, s_bytes) = bytes.split_at_mut(32);
        r_bytes.copy_from_slice(&r.to_be_bytes::<32>());
        s_bytes.copy_from_slice(&s.to_be_bytes::<32>());
        ECDSASignature::from_slice(&bytes).map_err(SignatureError::ECDSAError)?
    };

    let verifying_key =
        VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id.into())
            .map_err(SignatureError::ECDSAError)?;

    Ok(verifying_key.into())
}
