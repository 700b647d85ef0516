use core::{fmt, str::FromStr};

use alloy_primitives::U256;

/// The largest chain ID for which an EIP-155 `v` value (`recovery_id +
/// chain_id * 2 + 35`) still fits in a `u64`.
pub const MAX_CHAIN_ID: u64 = (u64::MAX - 36) / 2;

/// An error that occurs when constructing a [`ChainId`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChainIdError {
    /// The chain ID is zero.
    #[error("Chain ID must be positive")]
    Zero,
    /// The chain ID does not fit in eight bytes.
    #[error("Chain ID {0} does not fit in 8 bytes")]
    TooLarge(U256),
    /// The chain ID fits in eight bytes, but its EIP-155 `v` value would not.
    #[error("Chain ID {0} exceeds the maximum of {max}", max = MAX_CHAIN_ID)]
    ExceedsMaximum(u64),
    /// The chain ID is not a decimal number.
    #[error("Invalid chain ID '{0}', expected a decimal number")]
    InvalidDigits(String),
}

/// Identifier of a network, used for replay protection.
///
/// Always positive and small enough that EIP-155 arithmetic on it cannot
/// overflow.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct ChainId(u64);

impl ChainId {
    /// Validates the provided value as a chain ID.
    pub fn new(value: U256) -> Result<Self, ChainIdError> {
        let value = u64::try_from(value).map_err(|_error| ChainIdError::TooLarge(value))?;
        Self::try_from(value)
    }

    /// Returns the chain ID as a `u64`.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the minimal big-endian representation of the chain ID, without
    /// leading zero bytes.
    pub fn to_be_bytes_trimmed(self) -> Vec<u8> {
        let bytes = self.0.to_be_bytes();
        let leading_zeros = bytes.iter().take_while(|byte| **byte == 0).count();

        bytes.get(leading_zeros..).unwrap_or_default().to_vec()
    }
}

impl TryFrom<u64> for ChainId {
    type Error = ChainIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(ChainIdError::Zero)
        } else if value > MAX_CHAIN_ID {
            Err(ChainIdError::ExceedsMaximum(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<ChainId> for u64 {
    fn from(value: ChainId) -> Self {
        value.0
    }
}

impl From<ChainId> for U256 {
    fn from(value: ChainId) -> Self {
        U256::from(value.0)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ChainIdError::InvalidDigits(s.to_string()));
        }

        let value = U256::from_str_radix(s, 10)
            .map_err(|_error| ChainIdError::InvalidDigits(s.to_string()))?;
        Self::new(value)
    }
}
