use anchor_lang::prelude::*;

use crate::state::CctpAccount;

/// Event data account the MessageTransmitter writes every outgoing message into. Its rent is reclaimable by
/// `rent_payer` once the message is attested.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageSent {
    pub rent_payer: Pubkey,
    pub message: Vec<u8>,
}

impl CctpAccount for MessageSent {
    const ACCOUNT_NAME: &'static str = "MessageSent";
}
