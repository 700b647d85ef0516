use newcmd_address::{ChainAddressError, from_chain_address, parse_hex_address, to_chain_address};
use newcmd_amount::{AmountError, UnitNames, format_with_unit, to_base_units};
use newcmd_defaults::CHAIN_ADDRESS_PREFIX;
use newcmd_primitives::ChainId;

/// Converts a hexadecimal address to its chain address and vice versa.
pub fn convert_address(address: &str, chain_id: ChainId) -> Result<String, ChainAddressError> {
    if address.starts_with(CHAIN_ADDRESS_PREFIX) {
        from_chain_address(address, chain_id).map(|address| address.to_string())
    } else {
        parse_hex_address(address).map(|address| to_chain_address(chain_id, &address))
    }
}

/// Re-expresses `amount`, given in the unit named `from`, in the unit named
/// `to`.
pub fn convert_amount(
    amount: &str,
    from: &str,
    to: &str,
    unit_names: &UnitNames,
) -> Result<String, AmountError> {
    let from = unit_names.parse(from)?;
    let to = unit_names.parse(to)?;

    let base_units = to_base_units(amount, from)?;
    Ok(format_with_unit(base_units, Some(to), unit_names))
}
