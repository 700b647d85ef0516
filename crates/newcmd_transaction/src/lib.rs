//! Ethereum-style transactions: data model, canonical encoding, signing
//! digests and sender recovery.

pub mod codec;
mod digest;
mod request;
mod sign;
mod signature;
mod signed;
mod utils;

use newcmd_primitives::Address;
use newcmd_signer::{KeyStoreError, SignatureError};

pub use self::{
    codec::{DecodeError, decode, decode_signed, encode},
    digest::{signing_digest, signing_preimage},
    request::{Eip1559, Eip2930, Legacy, Request},
    sign::sign_request,
    signature::{
        EIP155_V_OFFSET, LEGACY_V_OFFSET, SignatureValues, legacy_recovery_id, legacy_v,
    },
    signed::{MaybeSigned, Signed},
};

/// The variant of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Legacy transaction, encoded without type byte
    Legacy,
    /// EIP-2930 access list transaction
    Eip2930,
    /// EIP-1559 dynamic fee transaction
    Eip1559,
}

impl From<TransactionType> for u8 {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Legacy => Legacy::TYPE,
            TransactionType::Eip2930 => Eip2930::TYPE,
            TransactionType::Eip1559 => Eip1559::TYPE,
        }
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            Legacy::TYPE => Ok(Self::Legacy),
            Eip2930::TYPE => Ok(Self::Eip2930),
            Eip1559::TYPE => Ok(Self::Eip1559),
            value => Err(DecodeError::UnsupportedTransactionType(value)),
        }
    }
}

/// An error that occurs while signing or verifying a transaction.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The recovered sender differs from the claimed sender.
    #[error("Sender mismatch: expected {expected}, recovered {recovered}")]
    SenderMismatch {
        /// The claimed sender
        expected: Address,
        /// The sender recovered from the signature
        recovered: Address,
    },
    /// The signature is invalid.
    #[error(transparent)]
    Signature(#[from] SignatureError),
    /// The key store failed to sign.
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}
