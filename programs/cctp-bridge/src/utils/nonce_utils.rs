use anchor_lang::prelude::*;

use crate::{
    constants::{seeds, MAX_NONCES, NONCE_WORD_BITS, USED_NONCES_DELIMITER, USED_NONCES_DELIMITER_DOMAIN},
    error::{BridgeError, Result},
    utils::{derive_program_address, Seed},
};

/// Location of a nonce's used flag inside its bucket bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoncePosition {
    pub first_nonce: u64, // First nonce of the bucket, also used as a derivation seed.
    pub word_index: usize,
    pub bit_index: u32,
}

/// First nonce of the bucket holding `nonce`, for buckets of `bucket_size` nonces starting at 1.
pub fn bucket_start(nonce: u64, bucket_size: u64) -> Result<u64> {
    if nonce == 0 {
        return Err(BridgeError::InvalidSeed("nonces start at 1".to_string()));
    }
    if bucket_size == 0 {
        return Err(BridgeError::InvalidSeed("bucket size must be positive".to_string()));
    }
    Ok((nonce - 1) / bucket_size * bucket_size + 1)
}

/// First nonce of the CCTP UsedNonces bucket holding `nonce`.
pub fn first_nonce(nonce: u64) -> Result<u64> {
    bucket_start(nonce, MAX_NONCES)
}

pub fn nonce_position(nonce: u64) -> Result<NoncePosition> {
    let first_nonce = first_nonce(nonce)?;
    let offset = nonce - first_nonce; // Always < MAX_NONCES.
    Ok(NoncePosition {
        first_nonce,
        word_index: (offset / NONCE_WORD_BITS) as usize,
        bit_index: (offset % NONCE_WORD_BITS) as u32,
    })
}

pub fn is_nonce_set(words: &[u64], position: &NoncePosition) -> bool {
    match words.get(position.word_index) {
        Some(word) => word & (1u64 << position.bit_index) != 0,
        None => false, // Out of bounds, treat as unused.
    }
}

pub fn set_nonce(words: &mut [u64], position: &NoncePosition) -> Result<()> {
    let word = words
        .get_mut(position.word_index)
        .ok_or_else(|| BridgeError::InvalidSeed(format!("word index {} outside bitmap", position.word_index)))?;
    *word |= 1u64 << position.bit_index;
    Ok(())
}

/// Seeds of the UsedNonces account: ["used_nonces", remote_domain, (delimiter), first_nonce].
///
/// Domain and first nonce are decimal strings, so without a delimiter domain 1 / nonce 110003201 and domain 11 /
/// nonce 10003201 would concatenate to the same bytes. CCTP inserts "-" for every domain from 11 on. Domains below 11
/// get the plain ("used_nonces", remote_domain, first_nonce) tuple.
pub fn used_nonces_seeds(remote_domain: u32, first_nonce: u64) -> Vec<Seed> {
    let mut nonce_seeds = Vec::with_capacity(4);
    nonce_seeds.push(Seed::from(seeds::USED_NONCES));
    nonce_seeds.push(Seed::decimal(remote_domain));
    if remote_domain >= USED_NONCES_DELIMITER_DOMAIN {
        nonce_seeds.push(Seed::from(USED_NONCES_DELIMITER));
    }
    nonce_seeds.push(Seed::decimal(first_nonce));
    nonce_seeds
}

/// UsedNonces account tracking `nonce` of messages from `remote_domain`.
pub fn get_used_nonces_pda(message_transmitter_program: &Pubkey, remote_domain: u32, nonce: u64) -> Result<Pubkey> {
    let first_nonce = first_nonce(nonce)?;
    derive_program_address(&used_nonces_seeds(remote_domain, first_nonce), message_transmitter_program)
        .map(|(address, _bump)| address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(first_nonce(1).unwrap(), 1);
        assert_eq!(first_nonce(6400).unwrap(), 1);
        assert_eq!(first_nonce(6401).unwrap(), 6401);
        assert_eq!(first_nonce(12800).unwrap(), 6401);
        assert_eq!(first_nonce(12801).unwrap(), 12801);
        assert_eq!(first_nonce(u64::MAX).unwrap(), (u64::MAX - 1) / MAX_NONCES * MAX_NONCES + 1);
    }

    #[test]
    fn test_zero_nonce_rejected() {
        assert!(matches!(first_nonce(0), Err(BridgeError::InvalidSeed(_))));
        assert!(matches!(nonce_position(0), Err(BridgeError::InvalidSeed(_))));
    }

    #[test]
    fn test_zero_bucket_size_rejected() {
        assert!(matches!(bucket_start(5, 0), Err(BridgeError::InvalidSeed(_))));
    }

    #[test]
    fn test_custom_bucket_size() {
        assert_eq!(bucket_start(10, 10).unwrap(), 1);
        assert_eq!(bucket_start(11, 10).unwrap(), 11);
    }

    #[test]
    fn test_positions_within_bucket() {
        let s = 6401;
        assert_eq!(nonce_position(s).unwrap(), NoncePosition { first_nonce: s, word_index: 0, bit_index: 0 });
        assert_eq!(nonce_position(s + 63).unwrap(), NoncePosition { first_nonce: s, word_index: 0, bit_index: 63 });
        assert_eq!(nonce_position(s + 64).unwrap(), NoncePosition { first_nonce: s, word_index: 1, bit_index: 0 });
        assert_eq!(
            nonce_position(s + MAX_NONCES - 1).unwrap(),
            NoncePosition { first_nonce: s, word_index: 99, bit_index: 63 }
        );
    }

    #[test]
    fn test_worked_examples() {
        assert_eq!(nonce_position(12801).unwrap(), NoncePosition { first_nonce: 12801, word_index: 0, bit_index: 0 });
        assert_eq!(nonce_position(70).unwrap(), NoncePosition { first_nonce: 1, word_index: 1, bit_index: 5 });
    }

    #[test]
    fn test_set_then_check() {
        let mut words = [0u64; 100];
        let position = nonce_position(70).unwrap();
        assert!(!is_nonce_set(&words, &position));

        set_nonce(&mut words, &position).unwrap();
        assert!(is_nonce_set(&words, &position));
        assert_eq!(words[1], 1 << 5);

        // Neighbours stay clear.
        assert!(!is_nonce_set(&words, &nonce_position(69).unwrap()));
        assert!(!is_nonce_set(&words, &nonce_position(71).unwrap()));
    }

    #[test]
    fn test_out_of_bounds_word() {
        let mut words = [0u64; 1];
        let position = nonce_position(65).unwrap();
        assert!(!is_nonce_set(&words, &position));
        assert!(set_nonce(&mut words, &position).is_err());
    }

    #[test]
    fn test_delimiter_seed() {
        assert_eq!(used_nonces_seeds(10, 1).len(), 3);
        assert_eq!(used_nonces_seeds(11, 1).len(), 4);
        assert_eq!(used_nonces_seeds(11, 1)[2].as_bytes(), b"-");
    }
}
