mod eip1559;
mod eip2930;
mod legacy;

use alloy_rlp::{BufMut, Encodable};
use newcmd_eip2930::AccessList;
use newcmd_primitives::{Address, B256, Bytes, ChainId, U256};

pub use self::{eip1559::Eip1559, eip2930::Eip2930, legacy::Legacy};
use crate::{TransactionType, digest, utils::enveloped};

/// An unsigned transaction of any supported variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Legacy transaction, with or without EIP-155 replay protection
    Legacy(Legacy),
    /// EIP-2930 access list transaction
    Eip2930(Eip2930),
    /// EIP-1559 dynamic fee transaction
    Eip1559(Eip1559),
}

impl Request {
    /// Returns the variant of the transaction.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Request::Legacy(_) => TransactionType::Legacy,
            Request::Eip2930(_) => TransactionType::Eip2930,
            Request::Eip1559(_) => TransactionType::Eip1559,
        }
    }

    /// Returns the chain ID, if the transaction is bound to a chain.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Request::Legacy(request) => request.chain_id,
            Request::Eip2930(request) => Some(request.chain_id),
            Request::Eip1559(request) => Some(request.chain_id),
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            Request::Legacy(request) => request.nonce,
            Request::Eip2930(request) => request.nonce,
            Request::Eip1559(request) => request.nonce,
        }
    }

    /// Returns the gas price. For dynamic fee transactions this is the fee
    /// cap.
    pub fn gas_price(&self) -> &U256 {
        match self {
            Request::Legacy(request) => &request.gas_price,
            Request::Eip2930(request) => &request.gas_price,
            Request::Eip1559(request) => &request.max_fee_per_gas,
        }
    }

    pub fn gas_limit(&self) -> u64 {
        match self {
            Request::Legacy(request) => request.gas_limit,
            Request::Eip2930(request) => request.gas_limit,
            Request::Eip1559(request) => request.gas_limit,
        }
    }

    /// Returns the recipient, or `None` for contract creation.
    pub fn to(&self) -> Option<&Address> {
        match self {
            Request::Legacy(request) => request.to.as_ref(),
            Request::Eip2930(request) => request.to.as_ref(),
            Request::Eip1559(request) => request.to.as_ref(),
        }
    }

    pub fn value(&self) -> &U256 {
        match self {
            Request::Legacy(request) => &request.value,
            Request::Eip2930(request) => &request.value,
            Request::Eip1559(request) => &request.value,
        }
    }

    pub fn input(&self) -> &Bytes {
        match self {
            Request::Legacy(request) => &request.input,
            Request::Eip2930(request) => &request.input,
            Request::Eip1559(request) => &request.input,
        }
    }

    pub fn access_list(&self) -> Option<&AccessList> {
        match self {
            Request::Legacy(_) => None,
            Request::Eip2930(request) => Some(&request.access_list),
            Request::Eip1559(request) => Some(&request.access_list),
        }
    }

    /// Encodes the unsigned transaction, prefixed by its type byte unless it
    /// is a legacy transaction.
    ///
    /// This is the preimage of [`Request::signing_digest`].
    pub fn encode_unsigned(&self, out: &mut dyn BufMut) {
        match self {
            Request::Legacy(request) => request.encode(out),
            Request::Eip2930(request) => enveloped(Eip2930::TYPE, request, out),
            Request::Eip1559(request) => enveloped(Eip1559::TYPE, request, out),
        }
    }

    /// Computes the digest that must be signed to authorize the transaction.
    pub fn signing_digest(&self) -> B256 {
        digest::signing_digest(self)
    }

    /// Length of the fields that precede the signature values in the signed
    /// encoding.
    pub(crate) fn fields_length(&self) -> usize {
        match self {
            Request::Legacy(request) => request.fields_length(),
            Request::Eip2930(request) => request.fields_length(),
            Request::Eip1559(request) => request.fields_length(),
        }
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        match self {
            Request::Legacy(request) => request.encode_fields(out),
            Request::Eip2930(request) => request.encode_fields(out),
            Request::Eip1559(request) => request.encode_fields(out),
        }
    }
}

impl From<Legacy> for Request {
    fn from(value: Legacy) -> Self {
        Request::Legacy(value)
    }
}

impl From<Eip2930> for Request {
    fn from(value: Eip2930) -> Self {
        Request::Eip2930(value)
    }
}

impl From<Eip1559> for Request {
    fn from(value: Eip1559) -> Self {
        Request::Eip1559(value)
    }
}
