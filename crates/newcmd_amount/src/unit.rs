use core::{fmt, str::FromStr};

use crate::AmountError;

/// The unit an amount is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    /// The indivisible base unit.
    Base,
    /// The decimal display unit, worth `10^18` base units.
    Display,
}

/// The names a chain uses for its units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitNames {
    /// Name of the display unit.
    pub display: &'static str,
    /// Name of the base unit.
    pub base: &'static str,
}

/// Unit names of NewChain.
pub const NEWCHAIN_UNITS: UnitNames = UnitNames {
    display: "NEW",
    base: "ISAAC",
};

/// Unit names of Ethereum.
pub const ETHEREUM_UNITS: UnitNames = UnitNames {
    display: "ETH",
    base: "WEI",
};

impl UnitNames {
    /// Returns the name of `unit`.
    pub const fn name(&self, unit: Unit) -> &'static str {
        match unit {
            Unit::Base => self.base,
            Unit::Display => self.display,
        }
    }

    /// Resolves a unit name. Names are matched exactly.
    pub fn parse(&self, name: &str) -> Result<Unit, AmountError> {
        if name == self.display {
            Ok(Unit::Display)
        } else if name == self.base {
            Ok(Unit::Base)
        } else {
            Err(AmountError::IllegalUnit(name.to_string()))
        }
    }
}

impl fmt::Display for UnitNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.display, self.base)
    }
}

impl FromStr for Unit {
    type Err = AmountError;

    /// Parses a unit name of either known chain.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NEWCHAIN_UNITS.parse(s).or_else(|_error| ETHEREUM_UNITS.parse(s))
    }
}
