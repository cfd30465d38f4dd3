#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use cctp_bridge::{
    utils::{encode_burn_message, MessageHeader},
    BridgeClient, BridgeConfig, Network,
};

pub const SPL_TOKEN_ACCOUNT_LEN: usize = 165;

pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

pub fn devnet_client() -> BridgeClient {
    BridgeClient::new(&BridgeConfig::new(Network::Devnet)).unwrap()
}

/// Initialized SPL token account in its packed 165-byte layout.
pub fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; SPL_TOKEN_ACCOUNT_LEN];
    data[..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    data[108] = 1; // AccountState::Initialized
    data
}

/// Burn message from `source_domain` to Solana, addressed to `recipient` (the receiving TokenMessengerMinter).
pub fn burn_message(
    source_domain: u32,
    nonce: u64,
    recipient: &Pubkey,
    burn_token: &Pubkey,
    mint_recipient: &Pubkey,
    amount: u64,
    destination_caller: Pubkey,
) -> Vec<u8> {
    let body = encode_burn_message(burn_token, mint_recipient, amount, &key(0xee));
    MessageHeader {
        source_domain,
        destination_domain: cctp_bridge::constants::domains::SOLANA,
        nonce,
        sender: key(0xaa),
        recipient: *recipient,
        destination_caller,
    }
    .encode(&body)
}
