use newcmd_primitives::Address;
use newcmd_signer::{
    KeyStore, RecoverableSignature, SecretKey, SignatureError, secret_key_to_address,
};

use crate::{Request, Signed, TransactionError};

impl Request {
    /// Signs the transaction with the provided secret key.
    pub fn sign(self, secret_key: &SecretKey) -> Result<Signed, SignatureError> {
        let digest = self.signing_digest();
        let signature = RecoverableSignature::sign_prehash(&digest, secret_key)?;

        let signed = Signed::new(self, &signature);
        debug_assert_eq!(
            signed.recover_sender().ok(),
            Some(secret_key_to_address(secret_key))
        );

        Ok(signed)
    }
}

/// Signs `request` with the key of `sender` held by `key_store`.
///
/// The sender recovered from the resulting signature is verified to equal
/// `sender` before the signed transaction is returned.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn sign_request<KeyStoreT: KeyStore + ?Sized>(
    request: Request,
    key_store: &KeyStoreT,
    sender: &Address,
) -> Result<Signed, TransactionError> {
    let digest = request.signing_digest();
    let signature = key_store.sign_digest(sender, &digest)?;

    let signed = Signed::new(request, &signature);
    signed.verify_sender(sender)?;

    log::debug!(
        "Signed {:?} transaction {} from {sender}",
        signed.transaction_type(),
        signed.transaction_hash()
    );

    Ok(signed)
}
