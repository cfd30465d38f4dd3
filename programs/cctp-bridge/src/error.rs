//! Error types for derivation, decoding and transaction building.

use anchor_lang::prelude::Pubkey;
use thiserror::Error;

use crate::config::Network;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error when loading config.
    #[error("failed to read config file '{path}': {source}")]
    FileRead { path: String, source: std::io::Error },

    /// YAML parsing error.
    #[error("failed to parse config file '{path}': {source}")]
    Parse { path: String, source: serde_yaml::Error },

    /// Validation failed with one or more errors.
    #[error("config validation failed:\n{}", .0.join("\n"))]
    ValidationFailed(Vec<String>),
}

/// Errors raised by the bridge client. None of them are retried internally.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The network variant has no deployment of the requested program.
    #[error("network '{network}' has no {program} deployment")]
    UnsupportedNetwork { network: Network, program: &'static str },

    /// A required program address is missing from the configuration.
    #[error("{program} program address is not configured for network '{network}'")]
    ContractNotFound { network: Network, program: &'static str },

    /// An expected ledger account or transaction is absent.
    #[error("{role} not found: {address}")]
    AccountNotFound { role: &'static str, address: String },

    /// Derivation input is malformed or no bump produced a valid address.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// CCTP message bytes do not match the expected layout.
    #[error("malformed message: {0}")]
    MalformedMessage(&'static str),

    /// Ledger account data does not match the expected layout.
    #[error("malformed account {account}: {reason}")]
    MalformedAccount { account: Pubkey, reason: String },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// The message names a destination caller other than the redeeming payer.
    #[error("destination caller mismatch: message requires {expected}, got {actual}")]
    DestinationCallerMismatch { expected: Pubkey, actual: Pubkey },

    /// The external ledger query failed.
    #[error("ledger query failed: {0}")]
    Ledger(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Borsh encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] std::io::Error),
}

impl BridgeError {
    pub fn account_not_found(role: &'static str, address: &Pubkey) -> Self {
        BridgeError::AccountNotFound { role, address: address.to_string() }
    }
}

/// Result type for bridge client operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
