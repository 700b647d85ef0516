use alloy_rlp::{BufMut, Encodable};
use newcmd_primitives::{Address, Bytes, ChainId, U256};

use crate::utils::{encode_list_header, encode_to, list_length, to_length};

/// A legacy transaction request, optionally replay-protected as specified by
/// EIP-155.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Legacy {
    // The order of these fields determines encoding order.
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    /// When present, `[chain_id, 0, 0]` is appended to the unsigned encoding
    /// and folded into the signature's `v` value.
    pub chain_id: Option<ChainId>,
}

impl Legacy {
    /// The type identifier for a legacy transaction.
    pub const TYPE: u8 = 0;

    /// Length of the fields shared by the signed and unsigned encodings.
    pub(crate) fn fields_length(&self) -> usize {
        self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + to_length(self.to.as_ref())
            + self.value.length()
            + self.input.length()
    }

    /// Encodes the fields shared by the signed and unsigned encodings,
    /// without list header.
    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        encode_to(self.to.as_ref(), out);
        self.value.encode(out);
        self.input.encode(out);
    }

    fn replay_protection_length(&self) -> usize {
        self.chain_id
            .map_or(0, |chain_id| chain_id.get().length() + 2 * 0u8.length())
    }
}

impl Encodable for Legacy {
    fn encode(&self, out: &mut dyn BufMut) {
        encode_list_header(self.fields_length() + self.replay_protection_length(), out);
        self.encode_fields(out);

        if let Some(chain_id) = self.chain_id {
            chain_id.get().encode(out);
            0u8.encode(out);
            0u8.encode(out);
        }
    }

    fn length(&self) -> usize {
        list_length(self.fields_length() + self.replay_protection_length())
    }
}
