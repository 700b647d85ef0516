use alloy_rlp::{BufMut, EMPTY_STRING_CODE, Encodable, Header};
use newcmd_primitives::Address;

/// RLP-encodes the provided value and prepends it with the provided ID.
pub fn enveloped<T: Encodable>(id: u8, v: &T, out: &mut dyn BufMut) {
    out.put_u8(id);
    v.encode(out);
}

/// Writes the header of a list with the provided payload length.
pub(crate) fn encode_list_header(payload_length: usize, out: &mut dyn BufMut) {
    Header {
        list: true,
        payload_length,
    }
    .encode(out);
}

/// Returns the encoded length of a list with the provided payload length.
pub(crate) fn list_length(payload_length: usize) -> usize {
    alloy_rlp::length_of_length(payload_length) + payload_length
}

/// Encodes a recipient. Contract creation is encoded as the empty string.
pub(crate) fn encode_to(to: Option<&Address>, out: &mut dyn BufMut) {
    match to {
        Some(address) => address.encode(out),
        None => out.put_u8(EMPTY_STRING_CODE),
    }
}

pub(crate) fn to_length(to: Option<&Address>) -> usize {
    to.map_or(1, |address| address.length())
}
