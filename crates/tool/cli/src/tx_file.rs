use std::path::Path;

use anyhow::Context;
use newcmd_address::{ChainAddressError, parse_address};
use newcmd_amount::{AmountError, Unit, UnitNames, to_base_units};
use newcmd_defaults::MIN_GAS_LIMIT;
use newcmd_eip2930::AccessList;
use newcmd_primitives::{Address, Bytes, ChainId, ChainIdError, U256};
use newcmd_transaction::{Eip1559, Legacy, Request};

/// An error in a transaction file.
#[derive(Debug, thiserror::Error)]
pub enum TransactionFileError {
    /// A numeric field is neither a number nor a decimal or `0x`-prefixed
    /// hexadecimal string.
    #[error("Invalid {field}: {value}")]
    InvalidQuantity { field: &'static str, value: String },
    #[error(transparent)]
    Address(#[from] ChainAddressError),
    #[error(transparent)]
    Amount(#[from] AmountError),
    #[error("Invalid networkID: {0}")]
    ChainId(#[from] ChainIdError),
    #[error("Invalid data: {0}")]
    Data(#[from] hex::FromHexError),
}

/// A number written either as a JSON number or as a string.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    String(String),
}

impl Quantity {
    fn to_u256(&self, field: &'static str) -> Result<U256, TransactionFileError> {
        match self {
            Quantity::Number(value) => Ok(U256::from(*value)),
            Quantity::String(value) => {
                let trimmed = value.trim();
                let parsed = match trimmed.strip_prefix("0x") {
                    Some(digits) => U256::from_str_radix(digits, 16),
                    None => U256::from_str_radix(trimmed, 10),
                };

                parsed.map_err(|_error| TransactionFileError::InvalidQuantity {
                    field,
                    value: value.clone(),
                })
            }
        }
    }

    fn to_u64(&self, field: &'static str) -> Result<u64, TransactionFileError> {
        let value = self.to_u256(field)?;
        u64::try_from(value).map_err(|_error| TransactionFileError::InvalidQuantity {
            field,
            value: value.to_string(),
        })
    }
}

/// A transaction described in JSON, as produced by the `pay` workflow.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFile {
    pub from: String,
    /// Missing or empty for contract creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub value: String,
    /// Unit of `value`; the display unit when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub nonce: Quantity,
    pub gas_price: Quantity,
    pub gas: Quantity,
    #[serde(rename = "networkID")]
    pub network_id: Quantity,
    /// When present, a dynamic fee transaction is built with this tip and
    /// `gasPrice` as fee cap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_tips: Option<Quantity>,
}

impl TransactionFile {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed transaction file {}", path.display()))
    }

    /// Builds the request described by the file, together with its sender.
    pub fn to_request(
        &self,
        unit_names: &UnitNames,
    ) -> Result<(Address, Request), TransactionFileError> {
        let chain_id = ChainId::new(self.network_id.to_u256("networkID")?)?;

        let from = parse_address(&self.from, chain_id)?;
        let to = self
            .to
            .as_deref()
            .filter(|to| !to.is_empty())
            .map(|to| parse_address(to, chain_id))
            .transpose()?;

        let unit = self
            .unit
            .as_deref()
            .filter(|unit| !unit.is_empty())
            .map_or(Ok(Unit::Display), |unit| unit_names.parse(unit))?;
        let value = to_base_units(&self.value, unit)?;

        let input = match self.data.as_deref() {
            Some(data) if !data.is_empty() => Bytes::from(hex::decode(data)?),
            _ => Bytes::new(),
        };

        let nonce = self.nonce.to_u64("nonce")?;
        let gas_price = self.gas_price.to_u256("gasPrice")?;
        let mut gas_limit = self.gas.to_u64("gas")?;
        if gas_limit < MIN_GAS_LIMIT {
            log::warn!("Gas limit {gas_limit} is below {MIN_GAS_LIMIT}, using {MIN_GAS_LIMIT}");
            gas_limit = MIN_GAS_LIMIT;
        }

        let request = if let Some(gas_tips) = &self.gas_tips {
            Request::Eip1559(Eip1559 {
                chain_id,
                nonce,
                max_priority_fee_per_gas: gas_tips.to_u256("gasTips")?,
                max_fee_per_gas: gas_price,
                gas_limit,
                to,
                value,
                input,
                access_list: AccessList::default(),
            })
        } else {
            Request::Legacy(Legacy {
                nonce,
                gas_price,
                gas_limit,
                to,
                value,
                input,
                chain_id: Some(chain_id),
            })
        };

        Ok((from, request))
    }
}
