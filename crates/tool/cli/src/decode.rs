use newcmd_amount::{Unit, UnitNames, format_with_unit};
use newcmd_primitives::{Address, B256, Bytes, ChainId, U256};
use newcmd_signer::{public_key_to_address, public_key_to_bytes};
use newcmd_transaction::{
    MaybeSigned, Request, decode, decode_signed, signing_digest, signing_preimage,
};

/// The fields of a raw transaction, signed or not, as encoded.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFields {
    #[serde(rename = "type")]
    pub transaction_type: u8,
    pub to: Option<Address>,
    pub value: String,
    pub data: Bytes,
    pub nonce: u64,
    /// Fee cap for dynamic fee transactions.
    pub gas_price: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    pub gas: u64,
    pub chain_id: Option<ChainId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<U256>,
    pub raw: Bytes,
    pub unsigned: Bytes,
    pub signing_digest: B256,
}

impl TransactionFields {
    /// Decodes a raw transaction without recovering its sender.
    pub fn from_raw(raw: &[u8], unit_names: &UnitNames) -> anyhow::Result<Self> {
        let transaction = decode(raw)?;
        Ok(Self::new(&transaction, raw, unit_names))
    }

    fn new(transaction: &MaybeSigned, raw: &[u8], unit_names: &UnitNames) -> Self {
        let request = transaction.request();
        let signature = transaction.signature();

        let max_priority_fee_per_gas = match request {
            Request::Eip1559(request) => Some(request.max_priority_fee_per_gas),
            Request::Legacy(_) | Request::Eip2930(_) => None,
        };

        Self {
            transaction_type: request.transaction_type().into(),
            to: request.to().copied(),
            value: format_with_unit(*request.value(), Some(Unit::Display), unit_names),
            data: request.input().clone(),
            nonce: request.nonce(),
            gas_price: *request.gas_price(),
            max_priority_fee_per_gas,
            gas: request.gas_limit(),
            chain_id: request.chain_id(),
            v: signature.map(|signature| signature.v),
            r: signature.map(|signature| signature.r),
            s: signature.map(|signature| signature.s),
            raw: Bytes::copy_from_slice(raw),
            unsigned: Bytes::from(signing_preimage(request)),
            signing_digest: signing_digest(request),
        }
    }
}

/// Everything that can be learned from a signed raw transaction.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTransaction {
    pub hash: B256,
    pub from: Address,
    #[serde(flatten)]
    pub fields: TransactionFields,
    pub public_key: Bytes,
}

impl DecodedTransaction {
    /// Decodes a signed transaction and recovers its sender.
    pub fn from_raw(raw: &[u8], unit_names: &UnitNames) -> anyhow::Result<Self> {
        let signed = decode_signed(raw)?;
        let public_key = signed.recover_public_key()?;

        let hash = signed.transaction_hash();
        let transaction = MaybeSigned::Signed(signed);

        Ok(Self {
            hash,
            from: public_key_to_address(public_key),
            fields: TransactionFields::new(&transaction, raw, unit_names),
            public_key: Bytes::from(public_key_to_bytes(&public_key)),
        })
    }
}
