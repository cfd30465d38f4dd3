use anchor_lang::{prelude::*, solana_program::instruction::Instruction};

use crate::{error::Result, utils::EncodeInstructionData};

/// Accounts of the MessageTransmitter `reclaim_event_account` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclaimEventAccountAccounts {
    /// Rent payer recorded in the MessageSent account. Writable signer.
    pub payee: Pubkey,

    /// Seeds: ["message_transmitter"] (MessageTransmitter). Writable.
    pub message_transmitter: Pubkey,

    /// MessageSent account being closed. Writable.
    pub message_sent_event_data: Pubkey,

    pub program: Pubkey,
}

impl ReclaimEventAccountAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.payee, true),
            AccountMeta::new(self.message_transmitter, false),
            AccountMeta::new(self.message_sent_event_data, false),
        ]
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReclaimEventAccountParams {
    pub attestation: Vec<u8>,
}

/// Closes an attested MessageSent account and returns its rent to the payee.
pub fn reclaim_event_account(
    accounts: &ReclaimEventAccountAccounts,
    params: &ReclaimEventAccountParams,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: accounts.program,
        accounts: accounts.to_account_metas(),
        data: params.encode_instruction_data("global:reclaim_event_account")?,
    })
}
