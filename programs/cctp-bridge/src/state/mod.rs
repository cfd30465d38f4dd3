pub mod message_sent;
pub mod token_pair;
pub mod transfer;
pub mod used_nonces;

pub use message_sent::*;
pub use token_pair::*;
pub use transfer::*;
pub use used_nonces::*;

use anchor_lang::prelude::*;

use crate::{
    constants::DISCRIMINATOR_SIZE,
    error::{BridgeError, Result},
    utils::account_discriminator,
};

/// Anchor account owned by a CCTP program: 8-byte discriminator followed by the Borsh encoded fields.
pub trait CctpAccount: AnchorSerialize + AnchorDeserialize {
    const ACCOUNT_NAME: &'static str;

    fn discriminator() -> [u8; DISCRIMINATOR_SIZE] {
        account_discriminator(Self::ACCOUNT_NAME)
    }

    fn try_from_account_data(address: &Pubkey, data: &[u8]) -> Result<Self> {
        let malformed = |reason: String| BridgeError::MalformedAccount { account: *address, reason };

        if data.len() < DISCRIMINATOR_SIZE {
            return Err(malformed(format!("{} bytes is shorter than the discriminator", data.len())));
        }
        if data[..DISCRIMINATOR_SIZE] != Self::discriminator() {
            return Err(malformed(format!("not a {} account", Self::ACCOUNT_NAME)));
        }

        // Trailing bytes are allowed, accounts may be allocated larger than their fields.
        Self::deserialize(&mut &data[DISCRIMINATOR_SIZE..]).map_err(|e| malformed(e.to_string()))
    }

    fn to_account_data(&self) -> Result<Vec<u8>> {
        let mut data = Self::discriminator().to_vec();
        AnchorSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}
