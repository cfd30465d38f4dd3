use anchor_lang::{prelude::*, solana_program::hash};
use std::mem::size_of_val;

use crate::{constants::DISCRIMINATOR_SIZE, error::Result};

/// Anchor discriminator: first 8 bytes of sha256("<namespace>:<name>").
pub fn discriminator(preimage: &str) -> [u8; DISCRIMINATOR_SIZE] {
    let mut discriminator = [0u8; DISCRIMINATOR_SIZE];
    discriminator.copy_from_slice(&hash::hash(preimage.as_bytes()).to_bytes()[..DISCRIMINATOR_SIZE]);
    discriminator
}

pub fn account_discriminator(account_name: &str) -> [u8; DISCRIMINATOR_SIZE] {
    discriminator(&format!("account:{}", account_name))
}

pub trait EncodeInstructionData {
    fn encode_instruction_data(&self, discriminator_str: &str) -> Result<Vec<u8>>;
}

impl<T: AnchorSerialize> EncodeInstructionData for T {
    fn encode_instruction_data(&self, discriminator_str: &str) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(DISCRIMINATOR_SIZE + size_of_val(self));
        data.extend_from_slice(&discriminator(discriminator_str));
        AnchorSerialize::serialize(self, &mut data)?;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_prefixes_borsh_args() {
        let data = (7u64, 5u32).encode_instruction_data("global:deposit_for_burn").unwrap();
        assert_eq!(&data[..DISCRIMINATOR_SIZE], &discriminator("global:deposit_for_burn"));
        assert_eq!(&data[DISCRIMINATOR_SIZE..DISCRIMINATOR_SIZE + 8], &7u64.to_le_bytes());
        assert_eq!(&data[DISCRIMINATOR_SIZE + 8..], &5u32.to_le_bytes());
    }

    #[test]
    fn test_namespaces_differ() {
        assert_ne!(account_discriminator("UsedNonces"), discriminator("global:UsedNonces"));
    }
}
