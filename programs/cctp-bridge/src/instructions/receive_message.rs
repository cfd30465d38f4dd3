use anchor_lang::{prelude::*, solana_program::instruction::Instruction};

use crate::{error::Result, utils::EncodeInstructionData};

/// Accounts of the MessageTransmitter `receive_message` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveMessageAccounts {
    /// Pays rent for the UsedNonces account if this is the first nonce of its bucket. Writable signer.
    pub payer: Pubkey,

    /// Must match the message destination caller unless that is zero. Signer.
    pub caller: Pubkey,

    /// Seeds: ["message_transmitter_authority", receiver] (MessageTransmitter).
    pub authority_pda: Pubkey,

    /// Seeds: ["message_transmitter"] (MessageTransmitter).
    pub message_transmitter: Pubkey,

    /// Seeds: ["used_nonces", source_domain, (delimiter), first_nonce] (MessageTransmitter). Writable.
    pub used_nonces: Pubkey,

    /// Program handling the message body, the TokenMessengerMinter for burn messages.
    pub receiver: Pubkey,

    pub system_program: Pubkey,

    /// Seeds: ["__event_authority"] (MessageTransmitter).
    pub event_authority: Pubkey,

    /// MessageTransmitter itself, required by `emit_cpi!`.
    pub program: Pubkey,
}

impl ReceiveMessageAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.caller, true),
            AccountMeta::new_readonly(self.authority_pda, false),
            AccountMeta::new_readonly(self.message_transmitter, false),
            AccountMeta::new(self.used_nonces, false),
            AccountMeta::new_readonly(self.receiver, false),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.event_authority, false),
            AccountMeta::new_readonly(self.program, false),
        ]
    }
}

/// Remaining accounts the TokenMessengerMinter `handle_receive_message` expects after the MessageTransmitter accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleReceiveMessageAccounts {
    pub token_messenger: Pubkey,
    pub remote_token_messenger: Pubkey,

    /// Writable.
    pub token_minter: Pubkey,

    /// Writable.
    pub local_token: Pubkey,

    /// Seeds: ["token_pair", source_domain.to_string(), burn_token] (TokenMessengerMinter).
    pub token_pair: Pubkey,

    /// Mint recipient from the burn message. Writable.
    pub recipient_token_account: Pubkey,

    /// Seeds: ["custody", local_mint] (TokenMessengerMinter). Writable.
    pub custody_token_account: Pubkey,

    pub token_program: Pubkey,

    /// Seeds: ["__event_authority"] (TokenMessengerMinter).
    pub event_authority: Pubkey,

    pub program: Pubkey,
}

impl HandleReceiveMessageAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.token_messenger, false),
            AccountMeta::new_readonly(self.remote_token_messenger, false),
            AccountMeta::new(self.token_minter, false),
            AccountMeta::new(self.local_token, false),
            AccountMeta::new_readonly(self.token_pair, false),
            AccountMeta::new(self.recipient_token_account, false),
            AccountMeta::new(self.custody_token_account, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.event_authority, false),
            AccountMeta::new_readonly(self.program, false),
        ]
    }
}

/// Parameters for the `receive_message` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReceiveMessageParams {
    pub message: Vec<u8>,
    pub attestation: Vec<u8>, // Concatenated attester signatures from the attestation service.
}

pub fn receive_message(
    accounts: &ReceiveMessageAccounts,
    remaining_accounts: &HandleReceiveMessageAccounts,
    params: &ReceiveMessageParams,
) -> Result<Instruction> {
    let mut account_metas = accounts.to_account_metas();
    account_metas.extend(remaining_accounts.to_account_metas());

    Ok(Instruction {
        program_id: accounts.program,
        accounts: account_metas,
        data: params.encode_instruction_data("global:receive_message")?,
    })
}
