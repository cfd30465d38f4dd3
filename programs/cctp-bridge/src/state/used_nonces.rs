use anchor_lang::prelude::*;

use crate::{
    constants::USED_NONCES_WORDS,
    error::{BridgeError, Result},
    state::CctpAccount,
    utils::{is_nonce_set, nonce_position, set_nonce, NoncePosition},
};

/// MessageTransmitter replay protection bitmap for one bucket of nonces from one remote domain.
///
/// Zero-copy account with packed little-endian fields, which is byte-identical to its Borsh encoding.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct UsedNonces {
    pub remote_domain: u32,
    pub first_nonce: u64,
    pub used_nonces: [u64; USED_NONCES_WORDS],
}

impl CctpAccount for UsedNonces {
    const ACCOUNT_NAME: &'static str = "UsedNonces";
}

impl UsedNonces {
    pub fn new(remote_domain: u32, first_nonce: u64) -> Self {
        Self { remote_domain, first_nonce, used_nonces: [0u64; USED_NONCES_WORDS] }
    }

    fn position_in_bucket(&self, nonce: u64) -> Result<NoncePosition> {
        let position = nonce_position(nonce)?;
        if position.first_nonce != self.first_nonce {
            return Err(BridgeError::InvalidSeed(format!(
                "nonce {} belongs to bucket {}, account holds bucket {}",
                nonce, position.first_nonce, self.first_nonce
            )));
        }
        Ok(position)
    }

    pub fn is_nonce_used(&self, nonce: u64) -> Result<bool> {
        let position = self.position_in_bucket(nonce)?;
        Ok(is_nonce_set(&self.used_nonces, &position))
    }

    pub fn mark_used(&mut self, nonce: u64) -> Result<()> {
        let position = self.position_in_bucket(nonce)?;
        set_nonce(&mut self.used_nonces, &position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DISCRIMINATOR_SIZE;

    #[test]
    fn test_packed_layout() {
        let mut account = UsedNonces::new(0, 6401);
        account.mark_used(6401 + 65).unwrap();
        let data = account.to_account_data().unwrap();

        assert_eq!(data.len(), DISCRIMINATOR_SIZE + 4 + 8 + 8 * USED_NONCES_WORDS);
        assert_eq!(&data[DISCRIMINATOR_SIZE + 4..DISCRIMINATOR_SIZE + 12], &6401u64.to_le_bytes());
        let second_word = DISCRIMINATOR_SIZE + 12 + 8;
        assert_eq!(&data[second_word..second_word + 8], &2u64.to_le_bytes());
    }

    #[test]
    fn test_decode_checks_discriminator() {
        let address = Pubkey::new_from_array([1u8; 32]);
        let mut data = UsedNonces::new(3, 1).to_account_data().unwrap();
        assert_eq!(UsedNonces::try_from_account_data(&address, &data).unwrap(), UsedNonces::new(3, 1));

        data[0] ^= 0xff;
        assert!(matches!(
            UsedNonces::try_from_account_data(&address, &data),
            Err(BridgeError::MalformedAccount { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_bitmap() {
        let address = Pubkey::new_from_array([1u8; 32]);
        let data = UsedNonces::new(3, 1).to_account_data().unwrap();
        assert!(matches!(
            UsedNonces::try_from_account_data(&address, &data[..data.len() - 1]),
            Err(BridgeError::MalformedAccount { .. })
        ));
    }

    #[test]
    fn test_rejects_nonce_from_other_bucket() {
        let account = UsedNonces::new(0, 1);
        assert!(!account.is_nonce_used(6400).unwrap());
        assert!(account.is_nonce_used(6401).is_err());
    }
}
