use core::fmt;

use k256::{
    PublicKey, SecretKey,
    ecdsa::{
        RecoveryId as ECDSARecoveryId, Signature as ECDSASignature, SigningKey,
        signature::hazmat::PrehashSigner,
    },
};
use newcmd_primitives::{Address, B256, U256};

use crate::{RecoveryId, SignatureError, public_key_to_address, recover_public_key};

/// Length of a signature serialized as `r || s || recovery_id`.
pub const SIGNATURE_LENGTH: usize = 65;

/// An ECDSA signature with recovery ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecoverableSignature {
    /// R value
    pub r: U256,
    /// S value
    pub s: U256,
    /// Recovery ID
    pub recovery_id: RecoveryId,
}

impl RecoverableSignature {
    /// Signs a 32-byte digest. The resulting `s` is normalized to the lower
    /// half of the curve order.
    pub fn sign_prehash(digest: &B256, secret_key: &SecretKey) -> Result<Self, SignatureError> {
        let signing_key: SigningKey = secret_key.into();
        let (signature, recovery_id) =
            PrehashSigner::<(ECDSASignature, ECDSARecoveryId)>::sign_prehash(
                &signing_key,
                digest.as_slice(),
            )
            .map_err(SignatureError::ECDSAError)?;

        let (r, s) = signature.split_bytes();
        let recovery_id = RecoveryId::try_from(u64::from(recovery_id.to_byte()))?;

        Ok(Self {
            r: U256::from_be_slice(r.as_slice()),
            s: U256::from_be_slice(s.as_slice()),
            recovery_id,
        })
    }

    /// Recovers the public key that produced this signature over `digest`.
    pub fn recover_public_key(&self, digest: &B256) -> Result<PublicKey, SignatureError> {
        recover_public_key(digest, self.r, self.s, self.recovery_id)
    }

    /// Recovers the address that produced this signature over `digest`.
    pub fn recover_address(&self, digest: &B256) -> Result<Address, SignatureError> {
        self.recover_public_key(digest).map(public_key_to_address)
    }

    /// Serializes the signature as `r || s || recovery_id`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        let (r, rest) = bytes.split_at_mut(32);
        let (s, recovery_id) = rest.split_at_mut(32);

        r.copy_from_slice(&self.r.to_be_bytes::<32>());
        s.copy_from_slice(&self.s.to_be_bytes::<32>());
        recovery_id.fill(self.recovery_id.to_u8());

        bytes
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl TryFrom<&[u8]> for RecoverableSignature {
    type Error = SignatureError;

    /// Parses `r (32) || s (32) || recovery_id (1)`, where the recovery ID is
    /// 0 or 1 without offset.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: &[u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_error| SignatureError::InvalidLength(bytes.len()))?;

        let (r, rest) = bytes.split_at(32);
        let (s, recovery_id) = rest.split_at(32);
        let recovery_id = recovery_id.first().copied().unwrap_or_default();

        Ok(Self {
            r: U256::from_be_slice(r),
            s: U256::from_be_slice(s),
            recovery_id: RecoveryId::try_from(u64::from(recovery_id))?,
        })
    }
}
