//! Configuration validation.
//!
//! Collects every problem before returning so a config file can be fixed in one pass.

use std::str::FromStr;

use anchor_lang::prelude::Pubkey;

use crate::config::types::{BridgeConfig, ProgramsConfig};
use crate::error::ConfigError;

/// Validate the entire bridge configuration.
pub fn validate_config(config: &BridgeConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_programs_config(&config.programs, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_programs_config(config: &ProgramsConfig, errors: &mut Vec<String>) {
    let message_transmitter = parse_program(
        "programs.message_transmitter",
        config.message_transmitter.as_deref(),
        errors,
    );
    let token_messenger_minter = parse_program(
        "programs.token_messenger_minter",
        config.token_messenger_minter.as_deref(),
        errors,
    );

    if let (Some(a), Some(b)) = (message_transmitter, token_messenger_minter) {
        if a == b {
            errors.push("programs.message_transmitter and programs.token_messenger_minter must differ".to_string());
        }
    }
}

fn parse_program(field: &str, value: Option<&str>, errors: &mut Vec<String>) -> Option<Pubkey> {
    let value = value?;
    match Pubkey::from_str(value) {
        Ok(program_id) => Some(program_id),
        Err(_) => {
            errors.push(format!("{} is not a valid base58 address: '{}'", field, value));
            None
        }
    }
}
