use alloy_rlp::{BufMut, Encodable};
use newcmd_eip2930::AccessList;
use newcmd_primitives::{Address, Bytes, ChainId, U256};

use crate::utils::{encode_list_header, encode_to, list_length, to_length};

/// A dynamic fee transaction request, as specified by EIP-1559.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Eip1559 {
    // The order of these fields determines encoding order.
    pub chain_id: ChainId,
    pub nonce: u64,
    /// The tip paid to the block producer.
    pub max_priority_fee_per_gas: U256,
    /// The fee cap, including the base fee.
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    /// `None` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
}

impl Eip1559 {
    /// The type identifier for an EIP-1559 transaction.
    pub const TYPE: u8 = 2;

    pub(crate) fn fields_length(&self) -> usize {
        self.chain_id.get().length()
            + self.nonce.length()
            + self.max_priority_fee_per_gas.length()
            + self.max_fee_per_gas.length()
            + self.gas_limit.length()
            + to_length(self.to.as_ref())
            + self.value.length()
            + self.input.length()
            + self.access_list.length()
    }

    pub(crate) fn encode_fields(&self, out: &mut dyn BufMut) {
        self.chain_id.get().encode(out);
        self.nonce.encode(out);
        self.max_priority_fee_per_gas.encode(out);
        self.max_fee_per_gas.encode(out);
        self.gas_limit.encode(out);
        encode_to(self.to.as_ref(), out);
        self.value.encode(out);
        self.input.encode(out);
        self.access_list.encode(out);
    }
}

impl Encodable for Eip1559 {
    fn encode(&self, out: &mut dyn BufMut) {
        encode_list_header(self.fields_length(), out);
        self.encode_fields(out);
    }

    fn length(&self) -> usize {
        list_length(self.fields_length())
    }
}
