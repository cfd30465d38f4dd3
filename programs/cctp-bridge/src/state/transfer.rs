use anchor_lang::prelude::*;

use crate::{error::Result, utils::CctpMessage};

/// A burn-and-mint transfer as recorded in its CCTP message. Read-only once recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    source_domain: u32,
    destination_domain: u32,
    nonce: u64,
    burn_token: Pubkey,
    mint_recipient: Pubkey,
    amount: u64,
    message_sender: Pubkey,
    message: Vec<u8>,
}

impl TransferRecord {
    /// Parses the record from raw message bytes. Fails on anything other than a TokenMessenger burn message.
    pub fn from_message(message_bytes: &[u8]) -> Result<Self> {
        let message = CctpMessage::new(message_bytes)?;
        let burn = message.burn_message()?;

        Ok(Self {
            source_domain: message.source_domain(),
            destination_domain: message.destination_domain(),
            nonce: message.nonce(),
            burn_token: burn.burn_token(),
            mint_recipient: burn.mint_recipient(),
            amount: burn.amount()?,
            message_sender: burn.message_sender(),
            message: message_bytes.to_vec(),
        })
    }

    pub fn source_domain(&self) -> u32 {
        self.source_domain
    }

    pub fn destination_domain(&self) -> u32 {
        self.destination_domain
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn burn_token(&self) -> &Pubkey {
        &self.burn_token
    }

    pub fn mint_recipient(&self) -> &Pubkey {
        &self.mint_recipient
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn message_sender(&self) -> &Pubkey {
        &self.message_sender
    }

    /// Encoded message, as submitted to the attestation service and to `receive_message`.
    pub fn message(&self) -> &[u8] {
        &self.message
    }
}

/// Where a transfer stands on its destination ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// Burned on the source domain, nonce not yet consumed on the destination.
    Pending,
    /// Nonce consumed on the destination; the mint happened.
    Redeemed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::BridgeError,
        utils::{encode_burn_message, MessageHeader},
    };

    #[test]
    fn test_from_burn_message() {
        let body = encode_burn_message(
            &Pubkey::new_from_array([3u8; 32]),
            &Pubkey::new_from_array([4u8; 32]),
            42,
            &Pubkey::new_from_array([5u8; 32]),
        );
        let bytes = MessageHeader {
            source_domain: 5,
            destination_domain: 0,
            nonce: 70,
            sender: Pubkey::new_from_array([1u8; 32]),
            recipient: Pubkey::new_from_array([2u8; 32]),
            destination_caller: Pubkey::default(),
        }
        .encode(&body);

        let record = TransferRecord::from_message(&bytes).unwrap();
        assert_eq!(record.source_domain(), 5);
        assert_eq!(record.destination_domain(), 0);
        assert_eq!(record.nonce(), 70);
        assert_eq!(record.amount(), 42);
        assert_eq!(record.mint_recipient(), &Pubkey::new_from_array([4u8; 32]));
        assert_eq!(record.message(), bytes.as_slice());
    }

    #[test]
    fn test_rejects_non_burn_body() {
        let bytes = MessageHeader {
            source_domain: 5,
            destination_domain: 0,
            nonce: 1,
            sender: Pubkey::default(),
            recipient: Pubkey::default(),
            destination_caller: Pubkey::default(),
        }
        .encode(b"governance");

        assert!(matches!(TransferRecord::from_message(&bytes), Err(BridgeError::MalformedMessage(_))));
    }
}
