use newcmd_primitives::{Address, B256, keccak256};
use newcmd_signer::{
    PublicKey, RecoverableSignature, RecoveryId, SignatureError, public_key_to_address,
    recover_public_key, validate_low_s,
};

use crate::{Request, SignatureValues, TransactionError, TransactionType, codec};

/// A transaction request together with its signature.
///
/// The sender is not stored; it is always recovered from the signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signed {
    pub request: Request,
    pub signature: SignatureValues,
}

impl Signed {
    /// Attaches a signature over the request's signing digest, converting the
    /// recovery ID to the variant's `v` convention.
    pub fn new(request: Request, signature: &RecoverableSignature) -> Self {
        let v = request.v_from_recovery_id(signature.recovery_id);

        Self {
            request,
            signature: SignatureValues {
                v,
                r: signature.r,
                s: signature.s,
            },
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.request.transaction_type()
    }

    /// Returns the recovery ID encoded in the `v` value.
    pub fn recovery_id(&self) -> Result<RecoveryId, SignatureError> {
        let recovery_id = self.request.recovery_id_from_v(self.signature.v)?;
        Ok(recovery_id)
    }

    /// Recovers the public key of the sender.
    ///
    /// Signatures with `s` above half the curve order are rejected.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn recover_public_key(&self) -> Result<PublicKey, SignatureError> {
        validate_low_s(self.signature.s)?;

        let digest = self.request.signing_digest();
        recover_public_key(
            &digest,
            self.signature.r,
            self.signature.s,
            self.recovery_id()?,
        )
    }

    /// Recovers the address of the sender.
    pub fn recover_sender(&self) -> Result<Address, SignatureError> {
        self.recover_public_key().map(public_key_to_address)
    }

    /// Verifies that the transaction was signed by `claimed_sender`.
    ///
    /// A mismatch means the transaction was tampered with or constructed
    /// incorrectly and must not be retried.
    pub fn verify_sender(&self, claimed_sender: &Address) -> Result<(), TransactionError> {
        let recovered = self.recover_sender()?;
        if recovered != *claimed_sender {
            log::warn!(
                "Sender mismatch: expected {claimed_sender}, recovered {recovered} from transaction {}",
                self.transaction_hash()
            );

            return Err(TransactionError::SenderMismatch {
                expected: *claimed_sender,
                recovered,
            });
        }

        Ok(())
    }

    /// Encodes the signed transaction in its canonical raw form.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        codec::encode_signed(self, &mut out);
        out
    }

    /// Computes the transaction hash, the hash of the raw encoding.
    pub fn transaction_hash(&self) -> B256 {
        keccak256(self.encode())
    }
}

/// A decoded transaction, which may or may not carry a signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaybeSigned {
    Unsigned(Request),
    Signed(Signed),
}

impl MaybeSigned {
    pub fn request(&self) -> &Request {
        match self {
            MaybeSigned::Unsigned(request) => request,
            MaybeSigned::Signed(signed) => &signed.request,
        }
    }

    pub fn signature(&self) -> Option<&SignatureValues> {
        match self {
            MaybeSigned::Unsigned(_) => None,
            MaybeSigned::Signed(signed) => Some(&signed.signature),
        }
    }

    /// Encodes the transaction in its canonical raw form.
    pub fn encode(&self) -> Vec<u8> {
        codec::encode(self)
    }
}

impl From<Request> for MaybeSigned {
    fn from(value: Request) -> Self {
        MaybeSigned::Unsigned(value)
    }
}

impl From<Signed> for MaybeSigned {
    fn from(value: Signed) -> Self {
        MaybeSigned::Signed(value)
    }
}
