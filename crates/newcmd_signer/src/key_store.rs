use std::collections::HashMap;

use k256::SecretKey;
use newcmd_primitives::{Address, B256};

use crate::{RecoverableSignature, SignatureError, secret_key_to_address};

/// An error that occurs while using a [`KeyStore`].
#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    /// The key store holds no key for the account.
    #[error("Unknown account {0}")]
    UnknownAccount(Address),
    /// The account has not been unlocked.
    #[error("Account {0} is locked")]
    Locked(Address),
    /// The passphrase does not unlock the account.
    #[error("Could not decrypt key for {0} with the given passphrase")]
    WrongPassphrase(Address),
    /// Signing failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Holder of secret keys that signs digests on behalf of unlocked accounts.
pub trait KeyStore {
    /// Unlocks `address` for signing.
    fn unlock(&mut self, address: &Address, passphrase: &str) -> Result<(), KeyStoreError>;

    /// Signs `digest` with the key of `address`.
    fn sign_digest(
        &self,
        address: &Address,
        digest: &B256,
    ) -> Result<RecoverableSignature, KeyStoreError>;
}

struct Account {
    secret_key: SecretKey,
    passphrase: String,
    unlocked: bool,
}

/// A [`KeyStore`] that keeps unencrypted secret keys in memory, each guarded
/// by a passphrase.
#[derive(Default)]
pub struct InMemoryKeyStore {
    accounts: HashMap<Address, Account>,
}

impl InMemoryKeyStore {
    /// Constructs an empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a locked account and returns its address.
    pub fn insert(&mut self, secret_key: SecretKey, passphrase: impl Into<String>) -> Address {
        let address = secret_key_to_address(&secret_key);
        self.accounts.insert(
            address,
            Account {
                secret_key,
                passphrase: passphrase.into(),
                unlocked: false,
            },
        );

        address
    }

    /// Locks `address` again. Returns whether the account is known.
    pub fn lock(&mut self, address: &Address) -> bool {
        self.accounts
            .get_mut(address)
            .map(|account| account.unlocked = false)
            .is_some()
    }
}

impl std::fmt::Debug for InMemoryKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyStore")
            .field("accounts", &self.accounts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn unlock(&mut self, address: &Address, passphrase: &str) -> Result<(), KeyStoreError> {
        let account = self
            .accounts
            .get_mut(address)
            .ok_or(KeyStoreError::UnknownAccount(*address))?;

        if account.passphrase != passphrase {
            return Err(KeyStoreError::WrongPassphrase(*address));
        }

        log::debug!("Unlocked account {address}");
        account.unlocked = true;
        Ok(())
    }

    fn sign_digest(
        &self,
        address: &Address,
        digest: &B256,
    ) -> Result<RecoverableSignature, KeyStoreError> {
        let account = self
            .accounts
            .get(address)
            .ok_or(KeyStoreError::UnknownAccount(*address))?;

        if !account.unlocked {
            return Err(KeyStoreError::Locked(*address));
        }

        let signature = RecoverableSignature::sign_prehash(digest, &account.secret_key)?;
        Ok(signature)
    }
}
