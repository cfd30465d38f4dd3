use std::fmt::Display;

use anchor_lang::{
    prelude::*,
    solana_program::pubkey::{MAX_SEEDS, MAX_SEED_LEN},
};
use tracing::debug;

use crate::{
    constants::seeds,
    error::{BridgeError, Result},
};

/// Single input to a program address derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Text(String),
    Bytes(Vec<u8>),
    Key(Pubkey),
}

impl Seed {
    /// Decimal string seed, the encoding CCTP uses for domains and nonces.
    pub fn decimal(value: impl Display) -> Self {
        Seed::Text(value.to_string())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Seed::Text(text) => text.as_bytes(),
            Seed::Bytes(bytes) => bytes,
            Seed::Key(key) => key.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<&[u8]> for Seed {
    fn from(bytes: &[u8]) -> Self {
        Seed::Bytes(bytes.to_vec())
    }
}

impl From<[u8; 32]> for Seed {
    fn from(bytes: [u8; 32]) -> Self {
        Seed::Bytes(bytes.to_vec())
    }
}

impl From<Pubkey> for Seed {
    fn from(key: Pubkey) -> Self {
        Seed::Key(key)
    }
}

impl From<&Pubkey> for Seed {
    fn from(key: &Pubkey) -> Self {
        Seed::Key(*key)
    }
}

/// Derives the program address and bump for `seeds` under `program_id`.
///
/// The bump occupies one of the `MAX_SEEDS` slots, so at most `MAX_SEEDS - 1` seeds are accepted, each no longer than
/// `MAX_SEED_LEN` bytes. Fails with `InvalidSeed` when no bump yields an off-curve address.
pub fn derive_program_address(seeds: &[Seed], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    if seeds.len() >= MAX_SEEDS {
        return Err(BridgeError::InvalidSeed(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some((index, seed)) = seeds.iter().enumerate().find(|(_, seed)| seed.len() > MAX_SEED_LEN) {
        return Err(BridgeError::InvalidSeed(format!(
            "seed {} is {} bytes, at most {} allowed",
            index,
            seed.len(),
            MAX_SEED_LEN
        )));
    }

    let seed_bytes: Vec<&[u8]> = seeds.iter().map(Seed::as_bytes).collect();
    let (address, bump) = Pubkey::try_find_program_address(&seed_bytes, program_id)
        .ok_or_else(|| BridgeError::InvalidSeed(format!("no viable bump for program {}", program_id)))?;

    debug!(%address, bump, %program_id, seeds = seeds.len(), "derived program address");
    Ok((address, bump))
}

/// Address-only convenience over `derive_program_address`.
pub fn derive_address(seeds: &[Seed], program_id: &Pubkey) -> Result<Pubkey> {
    derive_program_address(seeds, program_id).map(|(address, _bump)| address)
}

// MessageTransmitter PDAs.

pub fn get_message_transmitter_pda(message_transmitter_program: &Pubkey) -> Result<Pubkey> {
    derive_address(&[seeds::MESSAGE_TRANSMITTER.into()], message_transmitter_program)
}

/// Authority the MessageTransmitter signs with when it invokes `receiver`.
pub fn get_message_transmitter_authority_pda(
    message_transmitter_program: &Pubkey,
    receiver: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive_program_address(
        &[seeds::MESSAGE_TRANSMITTER_AUTHORITY.into(), receiver.into()],
        message_transmitter_program,
    )
}

/// Anchor `emit_cpi!` event authority of `program`.
pub fn get_event_authority_pda(program: &Pubkey) -> Result<Pubkey> {
    derive_address(&[seeds::EVENT_AUTHORITY.into()], program)
}

// TokenMessengerMinter PDAs.

pub fn get_token_messenger_pda(token_messenger_minter_program: &Pubkey) -> Result<Pubkey> {
    derive_address(&[seeds::TOKEN_MESSENGER.into()], token_messenger_minter_program)
}

pub fn get_token_minter_pda(token_messenger_minter_program: &Pubkey) -> Result<Pubkey> {
    derive_address(&[seeds::TOKEN_MINTER.into()], token_messenger_minter_program)
}

pub fn get_sender_authority_pda(token_messenger_minter_program: &Pubkey) -> Result<Pubkey> {
    derive_address(&[seeds::SENDER_AUTHORITY.into()], token_messenger_minter_program)
}

pub fn get_remote_token_messenger_pda(token_messenger_minter_program: &Pubkey, remote_domain: u32) -> Result<Pubkey> {
    derive_address(
        &[seeds::REMOTE_TOKEN_MESSENGER.into(), Seed::decimal(remote_domain)],
        token_messenger_minter_program,
    )
}

pub fn get_local_token_pda(token_messenger_minter_program: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    derive_address(&[seeds::LOCAL_TOKEN.into(), mint.into()], token_messenger_minter_program)
}

pub fn get_token_pair_pda(
    token_messenger_minter_program: &Pubkey,
    remote_domain: u32,
    remote_token: &Pubkey,
) -> Result<Pubkey> {
    derive_address(
        &[seeds::TOKEN_PAIR.into(), Seed::decimal(remote_domain), remote_token.into()],
        token_messenger_minter_program,
    )
}

pub fn get_custody_token_pda(token_messenger_minter_program: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    derive_address(&[seeds::CUSTODY.into(), mint.into()], token_messenger_minter_program)
}

/// Associated token account of `owner` for `mint` under the classic SPL Token program.
pub fn get_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    derive_address(
        &[owner.into(), anchor_spl::token::ID.into(), mint.into()],
        &anchor_spl::associated_token::ID,
    )
}

/// Left pads a 20-byte EVM address into the 32-byte form CCTP uses for remote recipients.
pub fn evm_address_to_bytes32(address: &[u8; 20]) -> Pubkey {
    let mut padded = [0u8; 32];
    padded[12..].copy_from_slice(address);
    Pubkey::new_from_array(padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MESSAGE_TRANSMITTER_PROGRAM_ID, TOKEN_MESSENGER_MINTER_PROGRAM_ID};

    #[test]
    fn test_derivation_is_deterministic() {
        let seeds = vec![Seed::from("used_nonces"), Seed::decimal(0u32), Seed::decimal(1u64)];
        let first = derive_program_address(&seeds, &MESSAGE_TRANSMITTER_PROGRAM_ID).unwrap();
        let second = derive_program_address(&seeds, &MESSAGE_TRANSMITTER_PROGRAM_ID).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_runtime_derivation() {
        let mint = Pubkey::new_from_array([3u8; 32]);
        let expected =
            Pubkey::find_program_address(&[b"local_token".as_ref(), mint.as_ref()], &TOKEN_MESSENGER_MINTER_PROGRAM_ID);
        let derived = derive_program_address(
            &[seeds::LOCAL_TOKEN.into(), mint.into()],
            &TOKEN_MESSENGER_MINTER_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(derived, expected);
    }

    #[test]
    fn test_program_id_changes_address() {
        let a = get_token_messenger_pda(&TOKEN_MESSENGER_MINTER_PROGRAM_ID).unwrap();
        let b = get_token_messenger_pda(&MESSAGE_TRANSMITTER_PROGRAM_ID).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_oversized_seed() {
        let seeds = vec![Seed::Bytes(vec![1u8; MAX_SEED_LEN + 1])];
        let result = derive_program_address(&seeds, &MESSAGE_TRANSMITTER_PROGRAM_ID);
        assert!(matches!(result, Err(BridgeError::InvalidSeed(_))));
    }

    #[test]
    fn test_accepts_max_length_seed() {
        let seeds = vec![Seed::Bytes(vec![1u8; MAX_SEED_LEN])];
        assert!(derive_program_address(&seeds, &MESSAGE_TRANSMITTER_PROGRAM_ID).is_ok());
    }

    #[test]
    fn test_rejects_too_many_seeds() {
        let seeds: Vec<Seed> = (0..MAX_SEEDS).map(|i| Seed::decimal(i)).collect();
        let result = derive_program_address(&seeds, &MESSAGE_TRANSMITTER_PROGRAM_ID);
        assert!(matches!(result, Err(BridgeError::InvalidSeed(_))));

        let seeds: Vec<Seed> = (0..MAX_SEEDS - 1).map(|i| Seed::decimal(i)).collect();
        assert!(derive_program_address(&seeds, &MESSAGE_TRANSMITTER_PROGRAM_ID).is_ok());
    }

    #[test]
    fn test_seed_forms_share_bytes() {
        let key = Pubkey::new_from_array([9u8; 32]);
        assert_eq!(Seed::from(key).as_bytes(), Seed::from([9u8; 32]).as_bytes());
        assert_eq!(Seed::from("5").as_bytes(), Seed::decimal(5u32).as_bytes());
    }

    #[test]
    fn test_evm_address_padding() {
        let padded = evm_address_to_bytes32(&[0xab; 20]);
        assert_eq!(&padded.to_bytes()[..12], &[0u8; 12]);
        assert_eq!(&padded.to_bytes()[12..], &[0xab; 20]);
    }
}
