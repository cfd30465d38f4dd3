use anchor_lang::prelude::*;

pub const DISCRIMINATOR_SIZE: usize = 8;

// CCTP v1 programs. The same addresses are deployed on mainnet-beta and devnet.
pub const MESSAGE_TRANSMITTER_PROGRAM_ID: Pubkey = pubkey!("CCTPmbSD7gX1bxKPAmg77w8oFzNFpaQiQUWD43TKaecd");
pub const TOKEN_MESSENGER_MINTER_PROGRAM_ID: Pubkey = pubkey!("CCTPiPYPc6AsJuwueEnWgSgucamXDZwBd53dQ11YiKX3");

// Number of nonces sharing one UsedNonces bitmap account.
pub const MAX_NONCES: u64 = 6400;
pub const NONCE_WORD_BITS: u64 = 64;
pub const USED_NONCES_WORDS: usize = (MAX_NONCES / NONCE_WORD_BITS) as usize;

// Remote domains at or above this value get a delimiter seed between the domain and first nonce seeds.
pub const USED_NONCES_DELIMITER_DOMAIN: u32 = 11;
pub const USED_NONCES_DELIMITER: &str = "-";

pub mod seeds {
    pub const MESSAGE_TRANSMITTER: &str = "message_transmitter";
    pub const MESSAGE_TRANSMITTER_AUTHORITY: &str = "message_transmitter_authority";
    pub const USED_NONCES: &str = "used_nonces";
    pub const EVENT_AUTHORITY: &str = "__event_authority";
    pub const TOKEN_MESSENGER: &str = "token_messenger";
    pub const TOKEN_MINTER: &str = "token_minter";
    pub const SENDER_AUTHORITY: &str = "sender_authority";
    pub const REMOTE_TOKEN_MESSENGER: &str = "remote_token_messenger";
    pub const LOCAL_TOKEN: &str = "local_token";
    pub const TOKEN_PAIR: &str = "token_pair";
    pub const CUSTODY: &str = "custody";
}

/// CCTP domain identifiers.
pub mod domains {
    pub const ETHEREUM: u32 = 0;
    pub const AVALANCHE: u32 = 1;
    pub const OPTIMISM: u32 = 2;
    pub const ARBITRUM: u32 = 3;
    pub const NOBLE: u32 = 4;
    pub const SOLANA: u32 = 5;
    pub const BASE: u32 = 6;
    pub const POLYGON: u32 = 7;
}
