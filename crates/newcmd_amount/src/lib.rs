//! Fixed-point conversion between a chain's base unit and its decimal display
//! unit.
//!
//! One display unit equals `10^18` base units. All arithmetic is performed on
//! [`U256`] integers.

mod unit;

use std::sync::LazyLock;

use newcmd_primitives::U256;
use regex::Regex;

pub use self::unit::{ETHEREUM_UNITS, NEWCHAIN_UNITS, Unit, UnitNames};

/// Number of fractional digits of the display unit.
pub const DECIMALS: usize = 18;

const DISPLAY_UNIT_FACTOR: u128 = 10u128.pow(DECIMALS as u32);

static DECIMAL_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*|0\.[0-9]*|[1-9][0-9]*\.[0-9]*)$")
        .expect("decimal string pattern is valid")
});

/// An error that occurs while converting amounts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount has more fractional digits than the display unit supports.
    #[error(
        "Illegal amount: {digits} fractional digits exceed the maximum of {max}",
        max = DECIMALS
    )]
    TooManyDecimals {
        /// The number of fractional digits in the input.
        digits: usize,
    },
    /// The unit name is not known for the chain.
    #[error("Illegal unit '{0}'")]
    IllegalUnit(String),
    /// The amount is not an unsigned decimal number.
    #[error("Failed to parse amount '{0}'")]
    NumericParseError(String),
    /// The amount does not fit in 256 bits.
    #[error("Amount '{0}' is too large")]
    Overflow(String),
}

/// Returns whether `amount` is a plain unsigned decimal number, with at most
/// one decimal point and no superfluous leading zeros.
pub fn is_decimal_string(amount: &str) -> bool {
    DECIMAL_STRING.is_match(amount)
}

/// Converts a decimal string expressed in `unit` to base units.
pub fn to_base_units(amount: &str, unit: Unit) -> Result<U256, AmountError> {
    match unit {
        Unit::Base => parse_digits(amount, amount),
        Unit::Display => {
            let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
            if fraction.len() > DECIMALS {
                return Err(AmountError::TooManyDecimals {
                    digits: fraction.len(),
                });
            }

            let integer = parse_digits(integer, amount)?;
            let fraction = if fraction.is_empty() {
                U256::ZERO
            } else {
                let padding = 10u128.pow((DECIMALS - fraction.len()) as u32);
                parse_digits(fraction, amount)? * U256::from(padding)
            };

            integer
                .checked_mul(U256::from(DISPLAY_UNIT_FACTOR))
                .and_then(|integer| integer.checked_add(fraction))
                .ok_or_else(|| AmountError::Overflow(amount.to_string()))
        }
    }
}

/// Converts an amount of base units to a decimal string expressed in `unit`.
///
/// Trailing zeros of the fraction are trimmed and the decimal point is omitted
/// when nothing remains of it.
pub fn to_decimal_string(amount: U256, unit: Unit) -> String {
    let digits = amount.to_string();
    match unit {
        Unit::Base => digits,
        Unit::Display => {
            let (integer, fraction) = if digits.len() > DECIMALS {
                let (integer, fraction) = digits.split_at(digits.len() - DECIMALS);
                (integer.to_string(), fraction.to_string())
            } else {
                ("0".to_string(), format!("{digits:0>DECIMALS$}"))
            };

            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                integer
            } else {
                format!("{integer}.{fraction}")
            }
        }
    }
}

/// Formats `amount` followed by the name of the unit it is expressed in.
///
/// Without an explicit unit, amounts of up to [`DECIMALS`] digits are shown in
/// base units and larger amounts in the display unit.
pub fn format_with_unit(amount: U256, unit: Option<Unit>, names: &UnitNames) -> String {
    let unit = unit.unwrap_or_else(|| {
        if amount.to_string().len() <= DECIMALS {
            Unit::Base
        } else {
            Unit::Display
        }
    });

    format!("{} {}", to_decimal_string(amount, unit), names.name(unit))
}

fn parse_digits(digits: &str, amount: &str) -> Result<U256, AmountError> {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AmountError::NumericParseError(amount.to_string()));
    }

    U256::from_str_radix(digits, 10).map_err(|_error| AmountError::Overflow(amount.to_string()))
}
