//! Configuration types for the bridge client.

use std::fmt;

use anchor_lang::prelude::Pubkey;
use serde::Deserialize;

use crate::constants::{domains, MESSAGE_TRANSMITTER_PROGRAM_ID, TOKEN_MESSENGER_MINTER_PROGRAM_ID};

/// Solana cluster the client builds transactions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Devnet,
    Localnet,
}

impl Network {
    /// Address of the CCTP MessageTransmitter program deployed by Circle on this network, if any.
    pub fn default_message_transmitter(self) -> Option<Pubkey> {
        match self {
            Network::Mainnet | Network::Devnet => Some(MESSAGE_TRANSMITTER_PROGRAM_ID),
            Network::Localnet => None,
        }
    }

    /// Address of the CCTP TokenMessengerMinter program deployed by Circle on this network, if any.
    pub fn default_token_messenger_minter(self) -> Option<Pubkey> {
        match self {
            Network::Mainnet | Network::Devnet => Some(TOKEN_MESSENGER_MINTER_PROGRAM_ID),
            Network::Localnet => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

/// Root configuration for the bridge client.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub network: Network,

    /// CCTP domain of the local chain.
    #[serde(default = "BridgeConfig::default_local_domain")]
    pub local_domain: u32,

    /// Program address overrides. Required on networks without a Circle deployment.
    #[serde(default)]
    pub programs: ProgramsConfig,
}

impl BridgeConfig {
    fn default_local_domain() -> u32 {
        domains::SOLANA
    }

    pub fn new(network: Network) -> Self {
        Self { network, local_domain: Self::default_local_domain(), programs: ProgramsConfig::default() }
    }
}

/// Base58 program addresses overriding the per-network defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramsConfig {
    #[serde(default)]
    pub message_transmitter: Option<String>,

    #[serde(default)]
    pub token_messenger_minter: Option<String>,
}

impl ProgramsConfig {
    pub fn is_empty(&self) -> bool {
        self.message_transmitter.is_none() && self.token_messenger_minter.is_none()
    }
}
