pub mod associated_token;
pub mod deposit_for_burn;
pub mod receive_message;
pub mod reclaim_event_account;

pub use associated_token::*;
pub use deposit_for_burn::*;
pub use receive_message::*;
pub use reclaim_event_account::*;

#[cfg(test)]
mod tests {
    use anchor_lang::prelude::*;

    use super::*;
    use crate::{constants::DISCRIMINATOR_SIZE, utils::discriminator};

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn test_deposit_for_burn_encoding() {
        let accounts = DepositForBurnAccounts {
            owner: key(1),
            event_rent_payer: key(2),
            sender_authority_pda: key(3),
            burn_token_account: key(4),
            message_transmitter: key(5),
            token_messenger: key(6),
            remote_token_messenger: key(7),
            token_minter: key(8),
            local_token: key(9),
            burn_token_mint: key(10),
            message_sent_event_data: key(11),
            message_transmitter_program: key(12),
            token_messenger_minter_program: key(13),
            token_program: key(14),
            system_program: key(15),
            event_authority: key(16),
            program: key(13),
        };
        let params = DepositForBurnParams { amount: 1_000_000, destination_domain: 0, mint_recipient: key(20) };
        let ix = deposit_for_burn(&accounts, &params).unwrap();

        assert_eq!(ix.program_id, key(13));
        assert_eq!(ix.accounts.len(), 17);
        assert_eq!(&ix.data[..DISCRIMINATOR_SIZE], &discriminator("global:deposit_for_burn"));
        assert_eq!(&ix.data[8..16], &1_000_000u64.to_le_bytes());
        assert_eq!(&ix.data[16..20], &0u32.to_le_bytes());
        assert_eq!(&ix.data[20..], key(20).as_ref());

        let signers: Vec<Pubkey> = ix.accounts.iter().filter(|meta| meta.is_signer).map(|meta| meta.pubkey).collect();
        assert_eq!(signers, vec![key(1), key(2), key(11)]);
    }

    #[test]
    fn test_receive_message_appends_remaining_accounts() {
        let accounts = ReceiveMessageAccounts {
            payer: key(1),
            caller: key(1),
            authority_pda: key(2),
            message_transmitter: key(3),
            used_nonces: key(4),
            receiver: key(5),
            system_program: key(6),
            event_authority: key(7),
            program: key(8),
        };
        let remaining = HandleReceiveMessageAccounts {
            token_messenger: key(9),
            remote_token_messenger: key(10),
            token_minter: key(11),
            local_token: key(12),
            token_pair: key(13),
            recipient_token_account: key(14),
            custody_token_account: key(15),
            token_program: key(16),
            event_authority: key(17),
            program: key(5),
        };
        let params = ReceiveMessageParams { message: vec![1, 2, 3], attestation: vec![9; 65] };
        let ix = receive_message(&accounts, &remaining, &params).unwrap();

        assert_eq!(ix.program_id, key(8));
        assert_eq!(ix.accounts.len(), 19);
        assert!(ix.accounts[4].is_writable);
        assert_eq!(ix.accounts[14].pubkey, key(14));
        assert!(ix.accounts[14].is_writable);

        // Vec<u8> arguments carry a u32 length prefix.
        assert_eq!(&ix.data[8..12], &3u32.to_le_bytes());
        assert_eq!(&ix.data[12..15], &[1, 2, 3]);
        assert_eq!(&ix.data[15..19], &65u32.to_le_bytes());
    }

    #[test]
    fn test_reclaim_event_account() {
        let accounts = ReclaimEventAccountAccounts {
            payee: key(1),
            message_transmitter: key(2),
            message_sent_event_data: key(3),
            program: key(4),
        };
        let ix = reclaim_event_account(&accounts, &ReclaimEventAccountParams { attestation: vec![] }).unwrap();

        assert_eq!(ix.program_id, key(4));
        assert_eq!(&ix.data[..DISCRIMINATOR_SIZE], &discriminator("global:reclaim_event_account"));
        assert!(ix.accounts.iter().all(|meta| meta.is_writable));
    }
}
