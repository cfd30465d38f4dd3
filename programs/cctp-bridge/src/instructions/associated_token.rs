use anchor_lang::{prelude::*, solana_program::instruction::Instruction};

use crate::{error::Result, utils::get_associated_token_address};

/// Associated Token program instruction tag for `CreateIdempotent`.
const CREATE_IDEMPOTENT: u8 = 1;

/// Builds the Associated Token program `CreateIdempotent` instruction for `owner`'s `mint` account.
///
/// Succeeds on chain whether or not the account already exists, so a plan may emit it after a stale read.
pub fn create_associated_token_account_idempotent(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Instruction> {
    let associated_token_account = get_associated_token_address(owner, mint)?;

    Ok(Instruction {
        program_id: anchor_spl::associated_token::ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(associated_token_account, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(anchor_lang::system_program::ID, false),
            AccountMeta::new_readonly(anchor_spl::token::ID, false),
        ],
        data: vec![CREATE_IDEMPOTENT],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_idempotent_layout() {
        let payer = Pubkey::new_from_array([1u8; 32]);
        let owner = Pubkey::new_from_array([2u8; 32]);
        let mint = Pubkey::new_from_array([3u8; 32]);
        let ix = create_associated_token_account_idempotent(&payer, &owner, &mint).unwrap();

        assert_eq!(ix.program_id, anchor_spl::associated_token::ID);
        assert_eq!(ix.data, vec![1]);
        assert_eq!(ix.accounts.len(), 6);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, get_associated_token_address(&owner, &mint).unwrap());
        assert!(!ix.accounts[2].is_writable);
    }
}
