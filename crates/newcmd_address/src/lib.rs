//! Parsing of hexadecimal addresses and the chain-scoped `NEW...` address
//! format.
//!
//! A chain address is the marker [`CHAIN_ADDRESS_PREFIX`] followed by the
//! base58check encoding, with version byte 0, of `chain_id_bytes || address`.

use newcmd_defaults::CHAIN_ADDRESS_PREFIX;
use newcmd_primitives::{Address, ChainId};

const BASE58_VERSION: u8 = 0;
const ADDRESS_LENGTH: usize = 20;

/// An error that occurs while parsing an address.
#[derive(Debug, thiserror::Error)]
pub enum ChainAddressError {
    /// The string is not 40 hexadecimal characters with an optional `0x`
    /// prefix.
    #[error("Invalid hex address '{0}'")]
    InvalidHexAddress(String),
    /// The string does not start with the chain address marker.
    #[error("'{0}' is not a chain address")]
    NotChainAddress(String),
    /// The base58check payload is corrupt.
    #[error(transparent)]
    Base58(#[from] bs58::decode::Error),
    /// The base58check version byte is not zero.
    #[error("Illegal chain address version {0}")]
    IllegalVersion(u8),
    /// The decoded payload is too short to hold an address.
    #[error("Illegal decoded length {0}, expected at least 20 bytes")]
    IllegalDecodedLength(usize),
    /// The chain ID embedded in the address differs from the expected one.
    #[error("Illegal chain ID 0x{actual}, expected 0x{expected}")]
    IllegalChainId {
        /// Hex-encoded chain ID bytes that were expected.
        expected: String,
        /// Hex-encoded chain ID bytes found in the address.
        actual: String,
    },
}

/// Parses a 20-byte address from 40 hexadecimal characters, optionally
/// prefixed by `0x` or `0X`. Case-insensitive.
pub fn parse_hex_address(address: &str) -> Result<Address, ChainAddressError> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    if digits.len() != 2 * ADDRESS_LENGTH {
        return Err(ChainAddressError::InvalidHexAddress(address.to_string()));
    }

    let mut bytes = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(digits, &mut bytes)
        .map_err(|_error| ChainAddressError::InvalidHexAddress(address.to_string()))?;

    Ok(Address::from(bytes))
}

/// Encodes `address` as a chain address for the chain identified by
/// `chain_id_bytes`.
pub fn encode_chain_address(chain_id_bytes: &[u8], address: &Address) -> String {
    let mut payload = Vec::with_capacity(chain_id_bytes.len() + ADDRESS_LENGTH);
    payload.extend_from_slice(chain_id_bytes);
    payload.extend_from_slice(address.as_slice());

    let encoded = bs58::encode(payload)
        .with_check_version(BASE58_VERSION)
        .into_string();

    format!("{CHAIN_ADDRESS_PREFIX}{encoded}")
}

/// Decodes a chain address, requiring its chain ID prefix to equal
/// `expected_chain_id_bytes` exactly.
pub fn decode_chain_address(
    chain_address: &str,
    expected_chain_id_bytes: &[u8],
) -> Result<Address, ChainAddressError> {
    let encoded = chain_address
        .strip_prefix(CHAIN_ADDRESS_PREFIX)
        .ok_or_else(|| ChainAddressError::NotChainAddress(chain_address.to_string()))?;

    // The returned bytes still start with the version byte.
    let decoded = bs58::decode(encoded).with_check(None).into_vec()?;
    let (version, payload) = decoded
        .split_first()
        .ok_or(ChainAddressError::IllegalDecodedLength(0))?;

    if *version != BASE58_VERSION {
        return Err(ChainAddressError::IllegalVersion(*version));
    }

    let chain_id_length = payload
        .len()
        .checked_sub(ADDRESS_LENGTH)
        .ok_or(ChainAddressError::IllegalDecodedLength(payload.len()))?;

    let (chain_id_bytes, address) = payload.split_at(chain_id_length);
    if chain_id_bytes != expected_chain_id_bytes {
        return Err(ChainAddressError::IllegalChainId {
            expected: hex::encode(expected_chain_id_bytes),
            actual: hex::encode(chain_id_bytes),
        });
    }

    Ok(Address::from_slice(address))
}

/// Encodes `address` as a chain address for `chain_id`.
pub fn to_chain_address(chain_id: ChainId, address: &Address) -> String {
    encode_chain_address(&chain_id.to_be_bytes_trimmed(), address)
}

/// Decodes a chain address that must belong to `chain_id`.
pub fn from_chain_address(
    chain_address: &str,
    chain_id: ChainId,
) -> Result<Address, ChainAddressError> {
    decode_chain_address(chain_address, &chain_id.to_be_bytes_trimmed())
}

/// Parses either a hexadecimal address or a chain address of `chain_id`.
pub fn parse_address(address: &str, chain_id: ChainId) -> Result<Address, ChainAddressError> {
    if address.starts_with(CHAIN_ADDRESS_PREFIX) {
        from_chain_address(address, chain_id)
    } else {
        parse_hex_address(address)
    }
}
