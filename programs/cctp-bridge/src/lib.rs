/// # CCTP Bridge Client
///
/// Client-side core for moving tokens between Solana and remote chains with Circle's Cross-Chain Transfer Protocol
/// (CCTP). The crate derives the MessageTransmitter and TokenMessengerMinter program addresses, tracks replay
/// protection through the used-nonce bitmap accounts, decodes CCTP messages and builds the unsigned transactions that
/// burn tokens on Solana (`deposit_for_burn`) or mint them from an attested remote message (`receive_message`).
///
/// Nothing here signs or broadcasts. Ledger reads go through the `LedgerQuery` trait and every produced transaction is
/// handed back to the caller as an `UnsignedTransaction`.
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod state;
pub mod utils;

pub use client::*;
pub use config::{load_config, load_config_from_str, BridgeConfig, Network};
pub use error::{BridgeError, Result};
pub use ledger::{InMemoryLedger, LedgerAccount, LedgerQuery, LedgerTransaction};
pub use state::*;
