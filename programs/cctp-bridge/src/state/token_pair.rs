use anchor_lang::prelude::*;

use crate::state::CctpAccount;

/// TokenMessengerMinter mapping between a remote token and the local mint it is minted as.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub remote_domain: u32,
    pub remote_token: Pubkey,
    pub local_token: Pubkey,
    pub bump: u8,
}

impl CctpAccount for TokenPair {
    const ACCOUNT_NAME: &'static str = "TokenPair";
}
