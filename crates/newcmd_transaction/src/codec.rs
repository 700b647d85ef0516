//! Canonical raw encoding of transactions.
//!
//! Legacy transactions are a bare RLP list. Typed transactions are prefixed by
//! their type byte.

use alloy_rlp::{BufMut, Decodable, EMPTY_LIST_CODE, EMPTY_STRING_CODE, Encodable, Header};
use newcmd_primitives::{Address, ChainId, ChainIdError, TxKind};

use crate::{
    MaybeSigned, Request, SignatureValues, Signed, TransactionType,
    request::{Eip1559, Eip2930, Legacy},
    signature::{EIP155_V_OFFSET, LEGACY_V_OFFSET},
    utils::encode_list_header,
};

/// An error that occurs while decoding a raw transaction.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The leading byte is neither a known transaction type nor the start of
    /// a list.
    #[error("Unsupported transaction type: 0x{0:02x}")]
    UnsupportedTransactionType(u8),
    /// The input is an RLP string where a list is expected.
    #[error("Expected an RLP list, found a string")]
    UnexpectedString,
    /// The input ends before the declared length of a field.
    #[error("Field `{field}` is truncated")]
    TruncatedField {
        /// Name of the field
        field: &'static str,
    },
    /// The list ends before a required field.
    #[error("Field `{field}` is missing")]
    MissingField {
        /// Name of the field
        field: &'static str,
    },
    /// A field does not hold a valid value of its type.
    #[error("Field `{field}` is malformed: {source}")]
    MalformedField {
        /// Name of the field
        field: &'static str,
        /// The underlying RLP error
        #[source]
        source: alloy_rlp::Error,
    },
    /// The list holds more fields than the transaction type defines.
    #[error("Transaction has unexpected trailing fields")]
    TrailingFields,
    /// Bytes follow the transaction's list.
    #[error("Transaction is followed by {0} unexpected bytes")]
    TrailingBytes(usize),
    /// The `v` value matches none of the conventions of the transaction type.
    #[error("Invalid signature V value: {0}")]
    InvalidV(u64),
    /// The chain ID field is invalid.
    #[error(transparent)]
    InvalidChainId(#[from] ChainIdError),
    /// A signed transaction was expected.
    #[error("Transaction is not signed")]
    MissingSignature,
}

/// Encodes a transaction in its canonical raw form.
pub fn encode(transaction: &MaybeSigned) -> Vec<u8> {
    let mut out = Vec::new();
    match transaction {
        MaybeSigned::Unsigned(request) => request.encode_unsigned(&mut out),
        MaybeSigned::Signed(signed) => encode_signed(signed, &mut out),
    }
    out
}

pub(crate) fn encode_signed(signed: &Signed, out: &mut dyn BufMut) {
    match signed.transaction_type() {
        TransactionType::Legacy => {}
        transaction_type => out.put_u8(transaction_type.into()),
    }

    encode_list_header(
        signed.request.fields_length() + signed.signature.length(),
        out,
    );
    signed.request.encode_fields(out);
    signed.signature.encode(out);
}

/// Decodes a raw transaction, signed or unsigned.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode(raw: &[u8]) -> Result<MaybeSigned, DecodeError> {
    let (&first, rest) = raw
        .split_first()
        .ok_or(DecodeError::TruncatedField {
            field: "transaction",
        })?;

    match first {
        Eip2930::TYPE => {
            log::debug!("Decoding EIP-2930 transaction");
            decode_eip2930(list_payload(rest)?)
        }
        Eip1559::TYPE => {
            log::debug!("Decoding EIP-1559 transaction");
            decode_eip1559(list_payload(rest)?)
        }
        byte if byte >= EMPTY_LIST_CODE => {
            log::debug!("Decoding legacy transaction");
            decode_legacy(list_payload(raw)?)
        }
        byte if byte >= EMPTY_STRING_CODE => Err(DecodeError::UnexpectedString),
        byte => Err(DecodeError::UnsupportedTransactionType(byte)),
    }
}

/// Decodes a raw transaction that must be signed.
pub fn decode_signed(raw: &[u8]) -> Result<Signed, DecodeError> {
    match decode(raw)? {
        MaybeSigned::Signed(signed) => Ok(signed),
        MaybeSigned::Unsigned(_) => Err(DecodeError::MissingSignature),
    }
}

/// Returns the payload of the list that spans all of `raw`.
fn list_payload(raw: &[u8]) -> Result<&[u8], DecodeError> {
    let mut buf = raw;
    let header = Header::decode(&mut buf).map_err(|error| match error {
        alloy_rlp::Error::InputTooShort => DecodeError::TruncatedField {
            field: "transaction",
        },
        source => DecodeError::MalformedField {
            field: "transaction",
            source,
        },
    })?;

    if !header.list {
        return Err(DecodeError::UnexpectedString);
    }

    let (payload, trailing) = buf
        .split_at_checked(header.payload_length)
        .ok_or(DecodeError::TruncatedField {
            field: "transaction",
        })?;

    if !trailing.is_empty() {
        return Err(DecodeError::TrailingBytes(trailing.len()));
    }

    Ok(payload)
}

fn decode_legacy(payload: &[u8]) -> Result<MaybeSigned, DecodeError> {
    let mut fields = FieldReader::new(payload);

    let mut request = Legacy {
        nonce: fields.read("nonce")?,
        gas_price: fields.read("gasPrice")?,
        gas_limit: fields.read("gas")?,
        to: fields.read_to()?,
        value: fields.read("value")?,
        input: fields.read("data")?,
        chain_id: None,
    };

    let Some(signature) = fields.read_signature()? else {
        return Ok(MaybeSigned::Unsigned(Request::Legacy(request)));
    };

    // An EIP-155 signing preimage: `[..., chain_id, 0, 0]`.
    if signature.r.is_zero() && signature.s.is_zero() {
        request.chain_id = Some(ChainId::try_from(signature.v)?);
        return Ok(MaybeSigned::Unsigned(Request::Legacy(request)));
    }

    request.chain_id = chain_id_from_legacy_v(signature.v)?;
    Ok(MaybeSigned::Signed(Signed {
        request: Request::Legacy(request),
        signature,
    }))
}

fn chain_id_from_legacy_v(v: u64) -> Result<Option<ChainId>, DecodeError> {
    match v {
        v if v == LEGACY_V_OFFSET || v == LEGACY_V_OFFSET + 1 => Ok(None),
        v if v >= EIP155_V_OFFSET + 2 => ChainId::try_from((v - EIP155_V_OFFSET) / 2)
            .map(Some)
            .map_err(|_error| DecodeError::InvalidV(v)),
        v => Err(DecodeError::InvalidV(v)),
    }
}

fn decode_eip2930(payload: &[u8]) -> Result<MaybeSigned, DecodeError> {
    let mut fields = FieldReader::new(payload);

    let request = Request::Eip2930(Eip2930 {
        chain_id: fields.read_chain_id()?,
        nonce: fields.read("nonce")?,
        gas_price: fields.read("gasPrice")?,
        gas_limit: fields.read("gas")?,
        to: fields.read_to()?,
        value: fields.read("value")?,
        input: fields.read("data")?,
        access_list: fields.read("accessList")?,
    });

    with_typed_signature(request, fields.read_signature()?)
}

fn decode_eip1559(payload: &[u8]) -> Result<MaybeSigned, DecodeError> {
    let mut fields = FieldReader::new(payload);

    let request = Request::Eip1559(Eip1559 {
        chain_id: fields.read_chain_id()?,
        nonce: fields.read("nonce")?,
        max_priority_fee_per_gas: fields.read("maxPriorityFeePerGas")?,
        max_fee_per_gas: fields.read("maxFeePerGas")?,
        gas_limit: fields.read("gas")?,
        to: fields.read_to()?,
        value: fields.read("value")?,
        input: fields.read("data")?,
        access_list: fields.read("accessList")?,
    });

    with_typed_signature(request, fields.read_signature()?)
}

fn with_typed_signature(
    request: Request,
    signature: Option<SignatureValues>,
) -> Result<MaybeSigned, DecodeError> {
    match signature {
        None => Ok(MaybeSigned::Unsigned(request)),
        Some(signature) if signature.v > 1 => Err(DecodeError::InvalidV(signature.v)),
        Some(signature) => Ok(MaybeSigned::Signed(Signed { request, signature })),
    }
}

/// Reads the fields of a transaction list in order.
struct FieldReader<'payload> {
    payload: &'payload [u8],
}

impl<'payload> FieldReader<'payload> {
    fn new(payload: &'payload [u8]) -> Self {
        Self { payload }
    }

    fn read<T: Decodable>(&mut self, field: &'static str) -> Result<T, DecodeError> {
        if self.payload.is_empty() {
            return Err(DecodeError::MissingField { field });
        }

        T::decode(&mut self.payload).map_err(|error| match error {
            alloy_rlp::Error::InputTooShort => DecodeError::TruncatedField { field },
            source => DecodeError::MalformedField { field, source },
        })
    }

    fn read_to(&mut self) -> Result<Option<Address>, DecodeError> {
        let kind: TxKind = self.read("to")?;
        Ok(kind.to().copied())
    }

    fn read_chain_id(&mut self) -> Result<ChainId, DecodeError> {
        let chain_id: u64 = self.read("chainId")?;
        Ok(ChainId::try_from(chain_id)?)
    }

    /// Reads the trailing `v`, `r` and `s` values, if any, and requires the
    /// list to end after them.
    fn read_signature(mut self) -> Result<Option<SignatureValues>, DecodeError> {
        if self.payload.is_empty() {
            return Ok(None);
        }

        let signature = SignatureValues {
            v: self.read("v")?,
            r: self.read("r")?,
            s: self.read("s")?,
        };

        if !self.payload.is_empty() {
            return Err(DecodeError::TrailingFields);
        }

        Ok(Some(signature))
    }
}
