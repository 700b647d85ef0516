use alloy_rlp::{BufMut, Encodable};
use newcmd_primitives::{ChainId, U256};
use newcmd_signer::{InvalidSignatureValue, RecoveryId};

use crate::{Request, TransactionType};

/// Offset of `v` for legacy transactions without replay protection.
pub const LEGACY_V_OFFSET: u64 = 27;

/// Offset of `v` for replay-protected legacy transactions, on top of twice
/// the chain ID.
pub const EIP155_V_OFFSET: u64 = 35;

/// The signature values as they appear in an encoded transaction.
///
/// The meaning of `v` depends on the transaction variant, see
/// [`Request::v_from_recovery_id`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignatureValues {
    /// V value
    pub v: u64,
    /// R value
    pub r: U256,
    /// S value
    pub s: U256,
}

// We need a custom implementation to avoid the struct being treated as an RLP
// list.
impl Encodable for SignatureValues {
    fn encode(&self, out: &mut dyn BufMut) {
        // The order of these fields determines encoding order.
        self.v.encode(out);
        self.r.encode(out);
        self.s.encode(out);
    }

    fn length(&self) -> usize {
        self.v.length() + self.r.length() + self.s.length()
    }
}

/// Computes the `v` value of a legacy transaction.
///
/// Without chain ID, `v = 27 + recovery_id`. With chain ID (EIP-155),
/// `v = recovery_id + chain_id * 2 + 35`.
pub fn legacy_v(recovery_id: RecoveryId, chain_id: Option<ChainId>) -> u64 {
    legacy_v_offset(chain_id) + u64::from(recovery_id)
}

/// Extracts the recovery ID from the `v` value of a legacy transaction.
pub fn legacy_recovery_id(
    v: u64,
    chain_id: Option<ChainId>,
) -> Result<RecoveryId, InvalidSignatureValue> {
    v.checked_sub(legacy_v_offset(chain_id))
        .ok_or(InvalidSignatureValue::RecoveryId(v))
        .and_then(RecoveryId::try_from)
}

fn legacy_v_offset(chain_id: Option<ChainId>) -> u64 {
    // `ChainId` is bounded such that this cannot overflow.
    chain_id.map_or(LEGACY_V_OFFSET, |chain_id| {
        chain_id.get() * 2 + EIP155_V_OFFSET
    })
}

impl Request {
    /// Maps a recovery ID to the `v` value used by the transaction's
    /// variant.
    pub fn v_from_recovery_id(&self, recovery_id: RecoveryId) -> u64 {
        match self.transaction_type() {
            TransactionType::Legacy => legacy_v(recovery_id, self.chain_id()),
            TransactionType::Eip2930 | TransactionType::Eip1559 => u64::from(recovery_id),
        }
    }

    /// Maps the `v` value used by the transaction's variant back to a
    /// recovery ID.
    pub fn recovery_id_from_v(&self, v: u64) -> Result<RecoveryId, InvalidSignatureValue> {
        match self.transaction_type() {
            TransactionType::Legacy => legacy_recovery_id(v, self.chain_id()),
            TransactionType::Eip2930 | TransactionType::Eip1559 => RecoveryId::try_from(v),
        }
    }
}
