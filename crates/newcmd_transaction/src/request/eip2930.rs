use alloy_rlp::{BufMut, Encodable};
use newcmd_eip2930::AccessList;
use newcmd_primitives::{Address, Bytes, ChainId, U256};

use crate::utils::{encode_list_header, encode_to, list_length, to_length};

/// An access list transaction request, as specified by EIP-2930.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip2930 {
    // The order of these fields determines encoding order.
    pub chain_id: ChainId,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
}

impl Eip2930 {
    /// The type identifier for an EIP-2930 transaction.
    pub const TYPE: u8 = 1;

    pub(crate) fn fields_length(&self) -> usize {
        self.chain_id.get().length()
            + self.nonce.length()
            + self.gas_price.length()
            + self.gas_limit.length()
            + to_length(self.to.as_ref())
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.get().encode(out);
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        encode_to(self.to.as_ref(), out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
    }
}

impl Encodable for Eip2930 {
    fn encode(&self, out: &mut dyn BufMut) {
        encode_list_header(self.fields_length(), out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        list_length(self.fields_length())
    }
}
