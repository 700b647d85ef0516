use newcmd_address::{ChainAddressError, parse_address};
use newcmd_amount::{AmountError, Unit, to_base_units};
use newcmd_primitives::{Address, Bytes, ChainId, U256};
use newcmd_transaction::{Legacy, Request};

/// An error in a batch payment file.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Line {line}: expected `address,amount`, got `{content}`")]
    MalformedLine { line: usize, content: String },
    #[error("Line {line}: {source}")]
    Address {
        line: usize,
        #[source]
        source: ChainAddressError,
    },
    #[error("Line {line}: {source}")]
    Amount {
        line: usize,
        #[source]
        source: AmountError,
    },
    #[error("Nonce overflows after {0} transactions")]
    NonceOverflow(usize),
    #[error("Batch total overflows")]
    TotalOverflow,
}

/// A single line of a batch file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub to: Address,
    /// Amount in base units.
    pub value: U256,
}

/// Parses `address,amount` lines, where the amount is given in the display
/// unit. Blank lines are skipped.
pub fn parse_batch(contents: &str, chain_id: ChainId) -> Result<Vec<Payment>, BatchError> {
    contents
        .lines()
        .enumerate()
        .map(|(index, content)| (index + 1, content.trim()))
        .filter(|(_, content)| !content.is_empty())
        .map(|(line, content)| {
            let fields: Vec<&str> = content.split(',').map(str::trim).collect();
            let [address, amount] = fields.as_slice() else {
                return Err(BatchError::MalformedLine {
                    line,
                    content: content.to_string(),
                });
            };

            let to = parse_address(address, chain_id)
                .map_err(|source| BatchError::Address { line, source })?;
            let value = to_base_units(amount, Unit::Display)
                .map_err(|source| BatchError::Amount { line, source })?;

            Ok(Payment { to, value })
        })
        .collect()
}

/// Parameters shared by all transactions of a batch.
#[derive(Clone, Copy, Debug)]
pub struct BatchParameters {
    pub chain_id: ChainId,
    /// Nonce of the first transaction.
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
}

/// The requests of a batch, in nonce order, and their totals.
#[derive(Clone, Debug)]
pub struct Batch {
    pub requests: Vec<Request>,
    pub total_value: U256,
    /// Sum of `gas_price * gas_limit` over all requests.
    pub total_gas_cost: U256,
}

pub fn build_batch(
    payments: &[Payment],
    parameters: &BatchParameters,
) -> Result<Batch, BatchError> {
    let gas_cost = parameters
        .gas_price
        .checked_mul(U256::from(parameters.gas_limit))
        .ok_or(BatchError::TotalOverflow)?;

    let mut batch = Batch {
        requests: Vec::with_capacity(payments.len()),
        total_value: U256::ZERO,
        total_gas_cost: U256::ZERO,
    };

    for (index, payment) in payments.iter().enumerate() {
        let nonce = u64::try_from(index)
            .ok()
            .and_then(|offset| parameters.nonce.checked_add(offset))
            .ok_or(BatchError::NonceOverflow(index))?;

        batch.total_value = batch
            .total_value
            .checked_add(payment.value)
            .ok_or(BatchError::TotalOverflow)?;
        batch.total_gas_cost = batch
            .total_gas_cost
            .checked_add(gas_cost)
            .ok_or(BatchError::TotalOverflow)?;

        batch.requests.push(Request::Legacy(Legacy {
            nonce,
            gas_price: parameters.gas_price,
            gas_limit: parameters.gas_limit,
            to: Some(payment.to),
            value: payment.value,
            input: Bytes::new(),
            chain_id: Some(parameters.chain_id),
        }));
    }

    Ok(batch)
}
