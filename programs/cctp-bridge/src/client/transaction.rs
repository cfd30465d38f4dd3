use anchor_lang::{prelude::*, solana_program::instruction::Instruction};

/// Transaction ready for signing. The client never signs or submits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    /// Short human-readable description, e.g. "deposit_for_burn".
    pub label: String,
    pub fee_payer: Pubkey,
    pub instructions: Vec<Instruction>,
    /// Keys that must sign besides the fee payer.
    pub co_signers: Vec<Pubkey>,
}

impl UnsignedTransaction {
    pub fn new(label: impl Into<String>, fee_payer: Pubkey, instructions: Vec<Instruction>) -> Self {
        Self { label: label.into(), fee_payer, instructions, co_signers: Vec::new() }
    }

    /// Adds a co-signer unless it is the fee payer or already listed.
    pub fn with_co_signer(mut self, signer: Pubkey) -> Self {
        if signer != self.fee_payer && !self.co_signers.contains(&signer) {
            self.co_signers.push(signer);
        }
        self
    }

    /// Fee payer first, then co-signers in insertion order.
    pub fn required_signers(&self) -> Vec<Pubkey> {
        std::iter::once(self.fee_payer).chain(self.co_signers.iter().copied()).collect()
    }
}
