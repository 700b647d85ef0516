use newcmd_primitives::Address;
#[allow(deprecated)]
// This is test code, it's ok to use `DangerousSecretKeyStr`
use newcmd_signer::{DangerousSecretKeyStr, public_key_to_address};
pub use newcmd_signer::{SecretKey, SignatureError};

/// Secret key used by the Hardhat-generated transaction vectors.
pub const DUMMY_SECRET_KEY: &str =
    "e331b6d69882b4cb4ea581d88e0b604039a3de5967688d3dcffdd2270c0fd109";

/// The first default account of Hardhat and Anvil.
pub const HARDHAT_SECRET_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Secret key of the example in EIP-155.
pub const EIP155_SECRET_KEY: &str =
    "0x4646464646464646464646464646464646464646464646464646464646464646";

/// Converts a hex string to a secret key.
pub fn secret_key_from_str(secret_key: &str) -> Result<SecretKey, SignatureError> {
    // This is test code, it's ok to use `DangerousSecretKeyStr`
    #[allow(deprecated)]
    newcmd_signer::secret_key_from_str(DangerousSecretKeyStr(secret_key))
}

/// Returns the secret key that signed the Hardhat-generated vectors.
pub fn dummy_secret_key() -> SecretKey {
    secret_key_from_str(DUMMY_SECRET_KEY).expect("should construct secret key from string")
}

/// Converts a secret key in a hex string format to an address.
///
/// Note that this function is in `newcmd_test_utils` to restrict opportunities
/// for misuse. In production code there should be only one place where secret
/// keys are parsed from string to avoid potential leakage into logs and error
/// messages.
///
/// # Examples
///
/// ```
/// use newcmd_test_utils::secret_key::{HARDHAT_SECRET_KEY, secret_key_to_address};
///
/// let address = secret_key_to_address(HARDHAT_SECRET_KEY).unwrap();
/// ```
pub fn secret_key_to_address(secret_key: &str) -> Result<Address, SignatureError> {
    let secret_key = secret_key_from_str(secret_key)?;
    Ok(public_key_to_address(secret_key.public_key()))
}
