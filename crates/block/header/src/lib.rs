//! Block headers and proof-of-authority (clique) signer recovery.

mod clique;

use newcmd_primitives::{Address, B64, B256, Bloom, Bytes, U256, keccak256};
use newcmd_signer::{
    RecoverableSignature, SIGNATURE_LENGTH, SignatureError, public_key_to_address,
};

pub use self::clique::{CliqueProposal, EXTRA_VANITY, NONCE_AUTH_VOTE, NONCE_DROP_VOTE};

/// An error that occurs while recovering the signer of a block.
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// The extra data is too short to hold a signature.
    #[error("Extra data of {0} bytes is too short to contain a 65-byte signature")]
    MissingSignatureSuffix(usize),
    /// The signature is invalid.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// ethereum block header
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    alloy_rlp::RlpDecodable,
    alloy_rlp::RlpEncodable,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "camelCase")]
#[rlp(trailing)]
pub struct BlockHeader {
    /// The parent block's hash
    pub parent_hash: B256,
    /// The ommers' root hash
    #[serde(rename = "sha3Uncles")]
    pub ommers_hash: B256,
    /// The block's beneficiary address
    #[serde(rename = "miner")]
    pub beneficiary: Address,
    /// The state's root hash
    pub state_root: B256,
    /// The transactions' root hash
    pub transactions_root: B256,
    /// The receipts' root hash
    pub receipts_root: B256,
    /// The logs' bloom
    pub logs_bloom: Bloom,
    /// The block's difficulty
    pub difficulty: U256,
    /// The block's number
    #[serde(with = "alloy_serde::quantity")]
    pub number: u64,
    /// The block's gas limit
    #[serde(with = "alloy_serde::quantity")]
    pub gas_limit: u64,
    /// The amount of gas used by the block
    #[serde(with = "alloy_serde::quantity")]
    pub gas_used: u64,
    /// The block's timestamp
    #[serde(with = "alloy_serde::quantity")]
    pub timestamp: u64,
    /// The block's extra data. Under clique, a vanity prefix followed by the
    /// sealer's 65-byte signature.
    pub extra_data: Bytes,
    /// The block's mix hash
    pub mix_hash: B256,
    /// The block's nonce
    pub nonce: B64,
    /// `BaseFee` was added by EIP-1559 and is ignored in legacy headers.
    #[serde(
        default,
        with = "alloy_serde::quantity::opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_fee_per_gas: Option<u128>,
}

impl BlockHeader {
    /// Calculates the block's hash.
    pub fn hash(&self) -> B256 {
        let encoded = alloy_rlp::encode(self);
        keccak256(encoded)
    }

    /// Splits the extra data into its unsigned prefix and the trailing
    /// signature.
    pub fn split_extra_data(&self) -> Result<(&[u8], &[u8]), AuthorityError> {
        let signature_start = self
            .extra_data
            .len()
            .checked_sub(SIGNATURE_LENGTH)
            .ok_or(AuthorityError::MissingSignatureSuffix(self.extra_data.len()))?;

        Ok(self.extra_data.split_at(signature_start))
    }

    /// Calculates the hash that the block's sealer signs: the block hash with
    /// the signature removed from the extra data.
    pub fn seal_hash(&self) -> Result<B256, AuthorityError> {
        let (unsigned_extra_data, _signature) = self.split_extra_data()?;

        let unsigned = BlockHeader {
            extra_data: Bytes::copy_from_slice(unsigned_extra_data),
            ..self.clone()
        };

        Ok(unsigned.hash())
    }

    /// Recovers the address of the block's sealer.
    pub fn recover_signer(&self) -> Result<Address, AuthorityError> {
        recover_block_signer(self)
    }
}

/// Recovers the address of the sealer from the signature at the end of the
/// header's extra data.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn recover_block_signer(header: &BlockHeader) -> Result<Address, AuthorityError> {
    let (_, signature) = header.split_extra_data()?;
    let signature = RecoverableSignature::try_from(signature)?;

    let seal_hash = header.seal_hash()?;
    log::debug!(
        "Recovering signer of block {} from seal hash {seal_hash}",
        header.number
    );

    let public_key = signature.recover_public_key(&seal_hash)?;
    Ok(public_key_to_address(public_key))
}
