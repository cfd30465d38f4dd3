use anchor_lang::prelude::*;

use crate::error::{BridgeError, Result};

// CCTPv1 message header constants from https://developers.circle.com/cctp/message-format. All integers are big-endian.
const VERSION_INDEX: usize = 0;
const SOURCE_DOMAIN_INDEX: usize = 4;
const DESTINATION_DOMAIN_INDEX: usize = 8;
const NONCE_INDEX: usize = 12;
const RECIPIENT_INDEX: usize = 52;
const DESTINATION_CALLER_INDEX: usize = 84;
const MESSAGE_BODY_INDEX: usize = 116;
pub const SUPPORTED_MESSAGE_VERSION: u32 = 0;

// CCTPv1 burn message body constants, relative to MESSAGE_BODY_INDEX.
const BODY_VERSION_INDEX: usize = 0;
const BURN_TOKEN_INDEX: usize = 4;
const MINT_RECIPIENT_INDEX: usize = 36;
const AMOUNT_INDEX: usize = 68;
const MESSAGE_SENDER_INDEX: usize = 100;
const BURN_MESSAGE_LEN: usize = 132;
pub const SUPPORTED_BODY_VERSION: u32 = 0;

fn read_u32(data: &[u8], index: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[index..index + 4]);
    u32::from_be_bytes(bytes)
}

fn read_u64(data: &[u8], index: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[index..index + 8]);
    u64::from_be_bytes(bytes)
}

fn read_pubkey(data: &[u8], index: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[index..index + 32]);
    Pubkey::new_from_array(bytes)
}

/// Read-only view over an encoded CCTP message. Lengths are checked once in `new`.
#[derive(Debug, Clone, Copy)]
pub struct CctpMessage<'a> {
    data: &'a [u8],
}

impl<'a> CctpMessage<'a> {
    pub fn new(message_bytes: &'a [u8]) -> Result<Self> {
        if message_bytes.len() < MESSAGE_BODY_INDEX {
            return Err(BridgeError::MalformedMessage("message shorter than header"));
        }
        if read_u32(message_bytes, VERSION_INDEX) != SUPPORTED_MESSAGE_VERSION {
            return Err(BridgeError::MalformedMessage("unsupported message version"));
        }

        Ok(Self { data: message_bytes })
    }

    pub fn source_domain(&self) -> u32 {
        read_u32(self.data, SOURCE_DOMAIN_INDEX)
    }

    pub fn destination_domain(&self) -> u32 {
        read_u32(self.data, DESTINATION_DOMAIN_INDEX)
    }

    pub fn nonce(&self) -> u64 {
        read_u64(self.data, NONCE_INDEX)
    }

    pub fn recipient(&self) -> Pubkey {
        read_pubkey(self.data, RECIPIENT_INDEX)
    }

    /// Zero means any caller may relay the message.
    pub fn destination_caller(&self) -> Pubkey {
        read_pubkey(self.data, DESTINATION_CALLER_INDEX)
    }

    pub fn body(&self) -> &'a [u8] {
        &self.data[MESSAGE_BODY_INDEX..]
    }

    pub fn burn_message(&self) -> Result<BurnMessage<'a>> {
        BurnMessage::new(self.body())
    }
}

/// Read-only view over a TokenMessenger burn message body.
#[derive(Debug, Clone, Copy)]
pub struct BurnMessage<'a> {
    data: &'a [u8],
}

impl<'a> BurnMessage<'a> {
    pub fn new(body: &'a [u8]) -> Result<Self> {
        if body.len() < BURN_MESSAGE_LEN {
            return Err(BridgeError::MalformedMessage("burn message shorter than expected"));
        }
        if read_u32(body, BODY_VERSION_INDEX) != SUPPORTED_BODY_VERSION {
            return Err(BridgeError::MalformedMessage("unsupported burn message version"));
        }

        Ok(Self { data: body })
    }

    /// Token burned on the source domain, as its 32-byte remote representation.
    pub fn burn_token(&self) -> Pubkey {
        read_pubkey(self.data, BURN_TOKEN_INDEX)
    }

    pub fn mint_recipient(&self) -> Pubkey {
        read_pubkey(self.data, MINT_RECIPIENT_INDEX)
    }

    /// Amount is encoded as uint256; anything above u64 cannot be minted on Solana.
    pub fn amount(&self) -> Result<u64> {
        let word = &self.data[AMOUNT_INDEX..AMOUNT_INDEX + 32];
        if word[..24].iter().any(|byte| *byte != 0) {
            return Err(BridgeError::MalformedMessage("burn amount exceeds u64"));
        }
        Ok(read_u64(word, 24))
    }

    pub fn message_sender(&self) -> Pubkey {
        read_pubkey(self.data, MESSAGE_SENDER_INDEX)
    }
}

/// Header fields of a CCTP message, used to assemble message bytes for local tooling and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub source_domain: u32,
    pub destination_domain: u32,
    pub nonce: u64,
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub destination_caller: Pubkey,
}

impl MessageHeader {
    pub fn encode(&self, body: &[u8]) -> Vec<u8> {
        let mut data = Vec::with_capacity(MESSAGE_BODY_INDEX + body.len());
        data.extend_from_slice(&SUPPORTED_MESSAGE_VERSION.to_be_bytes());
        data.extend_from_slice(&self.source_domain.to_be_bytes());
        data.extend_from_slice(&self.destination_domain.to_be_bytes());
        data.extend_from_slice(&self.nonce.to_be_bytes());
        data.extend_from_slice(self.sender.as_ref());
        data.extend_from_slice(self.recipient.as_ref());
        data.extend_from_slice(self.destination_caller.as_ref());
        data.extend_from_slice(body);
        data
    }
}

pub fn encode_burn_message(
    burn_token: &Pubkey,
    mint_recipient: &Pubkey,
    amount: u64,
    message_sender: &Pubkey,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(BURN_MESSAGE_LEN);
    data.extend_from_slice(&SUPPORTED_BODY_VERSION.to_be_bytes());
    data.extend_from_slice(burn_token.as_ref());
    data.extend_from_slice(mint_recipient.as_ref());
    data.extend_from_slice(&[0u8; 24]);
    data.extend_from_slice(&amount.to_be_bytes());
    data.extend_from_slice(message_sender.as_ref());
    data
}
