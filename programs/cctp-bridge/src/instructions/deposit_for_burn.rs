use anchor_lang::{prelude::*, solana_program::instruction::Instruction};

use crate::{error::Result, utils::EncodeInstructionData};

/// Accounts of the TokenMessengerMinter `deposit_for_burn` instruction, in program order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositForBurnAccounts {
    /// Owner of the burned tokens. Signer.
    pub owner: Pubkey,

    /// Pays rent for the MessageSent event account. Writable signer.
    pub event_rent_payer: Pubkey,

    /// Empty PDA validated by CCTP. Seeds: ["sender_authority"] (TokenMessengerMinter).
    pub sender_authority_pda: Pubkey,

    /// Token account the amount is burned from. Writable.
    pub burn_token_account: Pubkey,

    /// Seeds: ["message_transmitter"] (MessageTransmitter). Writable.
    pub message_transmitter: Pubkey,

    /// Seeds: ["token_messenger"] (TokenMessengerMinter).
    pub token_messenger: Pubkey,

    /// Seeds: ["remote_token_messenger", destination_domain.to_string()] (TokenMessengerMinter).
    pub remote_token_messenger: Pubkey,

    /// Seeds: ["token_minter"] (TokenMessengerMinter).
    pub token_minter: Pubkey,

    /// Seeds: ["local_token", mint] (TokenMessengerMinter). Writable.
    pub local_token: Pubkey,

    /// Mint of the burned token. Writable.
    pub burn_token_mint: Pubkey,

    /// Fresh keypair account the MessageTransmitter stores the outgoing message in. Writable signer.
    pub message_sent_event_data: Pubkey,

    pub message_transmitter_program: Pubkey,
    pub token_messenger_minter_program: Pubkey,
    pub token_program: Pubkey,
    pub system_program: Pubkey,

    /// Seeds: ["__event_authority"] (TokenMessengerMinter).
    pub event_authority: Pubkey,

    /// TokenMessengerMinter itself, required by `emit_cpi!`.
    pub program: Pubkey,
}

impl DepositForBurnAccounts {
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.owner, true),
            AccountMeta::new(self.event_rent_payer, true),
            AccountMeta::new_readonly(self.sender_authority_pda, false),
            AccountMeta::new(self.burn_token_account, false),
            AccountMeta::new(self.message_transmitter, false),
            AccountMeta::new_readonly(self.token_messenger, false),
            AccountMeta::new_readonly(self.remote_token_messenger, false),
            AccountMeta::new_readonly(self.token_minter, false),
            AccountMeta::new(self.local_token, false),
            AccountMeta::new(self.burn_token_mint, false),
            AccountMeta::new(self.message_sent_event_data, true),
            AccountMeta::new_readonly(self.message_transmitter_program, false),
            AccountMeta::new_readonly(self.token_messenger_minter_program, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.event_authority, false),
            AccountMeta::new_readonly(self.program, false),
        ]
    }
}

/// Parameters for the `deposit_for_burn` instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct DepositForBurnParams {
    pub amount: u64,
    pub destination_domain: u32,
    pub mint_recipient: Pubkey, // 32-byte recipient on the destination domain, left padded for EVM addresses.
}

/// Builds the instruction burning `params.amount` tokens for minting on `params.destination_domain`.
pub fn deposit_for_burn(accounts: &DepositForBurnAccounts, params: &DepositForBurnParams) -> Result<Instruction> {
    Ok(Instruction {
        program_id: accounts.token_messenger_minter_program,
        accounts: accounts.to_account_metas(),
        data: params.encode_instruction_data("global:deposit_for_burn")?,
    })
}
