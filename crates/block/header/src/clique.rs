use newcmd_primitives::{Address, B64};

use crate::BlockHeader;

/// Number of vanity bytes that precede the signers list and seal in the
/// extra data.
pub const EXTRA_VANITY: usize = 32;

/// Nonce of a block that votes to add its beneficiary as a signer.
pub const NONCE_AUTH_VOTE: B64 = B64::new([0xff; 8]);

/// Nonce of a block that votes to remove its beneficiary as a signer.
pub const NONCE_DROP_VOTE: B64 = B64::ZERO;

/// A vote cast by a clique block on its beneficiary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliqueProposal {
    /// Add the address to the set of signers.
    Authorize(Address),
    /// Remove the address from the set of signers.
    Drop(Address),
}

impl BlockHeader {
    /// Returns the signer vote cast by the block, if any.
    pub fn clique_proposal(&self) -> Option<CliqueProposal> {
        if self.beneficiary == Address::ZERO {
            return None;
        }

        if self.nonce == NONCE_AUTH_VOTE {
            Some(CliqueProposal::Authorize(self.beneficiary))
        } else if self.nonce == NONCE_DROP_VOTE {
            Some(CliqueProposal::Drop(self.beneficiary))
        } else {
            None
        }
    }
}
