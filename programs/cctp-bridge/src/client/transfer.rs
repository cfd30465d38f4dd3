use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use tracing::{debug, info};

use crate::{
    client::{CctpPrograms, UnsignedTransaction},
    error::{BridgeError, Result},
    instructions::{deposit_for_burn, DepositForBurnAccounts, DepositForBurnParams},
    ledger::LedgerQuery,
    utils::{
        get_associated_token_address, get_event_authority_pda, get_local_token_pda, get_message_transmitter_pda,
        get_remote_token_messenger_pda, get_sender_authority_pda, get_token_messenger_pda, get_token_minter_pda,
    },
};

/// Burn of local tokens for minting on a remote domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Owner of the burned tokens, burned from its associated token account.
    pub owner: Pubkey,
    /// Fee payer, also pays rent for the MessageSent account.
    pub payer: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub destination_domain: u32,
    /// 32-byte recipient on the destination domain.
    pub mint_recipient: Pubkey,
    /// Fresh keypair the caller signs with; the outgoing message is stored there.
    pub message_sent_event_data: Pubkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferStep {
    CheckSource,
    Done,
}

/// Lazy plan initiating a transfer. Yields a single `deposit_for_burn` transaction.
#[derive(Debug, Clone)]
pub struct TransferPlan {
    programs: CctpPrograms,
    request: TransferRequest,
    step: TransferStep,
}

impl TransferPlan {
    pub(crate) fn new(programs: CctpPrograms, local_domain: u32, request: TransferRequest) -> Result<Self> {
        if request.amount == 0 {
            return Err(BridgeError::InvalidAmount("transfer amount must be positive".to_string()));
        }
        if request.destination_domain == local_domain {
            return Err(BridgeError::InvalidDomain(format!(
                "destination domain {} is the local domain",
                request.destination_domain
            )));
        }

        Ok(Self { programs, request, step: TransferStep::CheckSource })
    }

    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    pub fn is_done(&self) -> bool {
        self.step == TransferStep::Done
    }

    /// Advances the plan, reading the ledger as needed. `None` once exhausted.
    ///
    /// A failed step leaves the plan where it was, so the call can be retried.
    pub async fn next<L: LedgerQuery + ?Sized>(&mut self, ledger: &L) -> Result<Option<UnsignedTransaction>> {
        if self.step == TransferStep::Done {
            return Ok(None);
        }

        let request = &self.request;
        let burn_token_account = get_associated_token_address(&request.owner, &request.mint)?;
        let account = ledger
            .get_account(&burn_token_account)
            .await?
            .ok_or_else(|| BridgeError::account_not_found("burn token account", &burn_token_account))?;

        let malformed = |reason: String| BridgeError::MalformedAccount { account: burn_token_account, reason };
        if account.owner != anchor_spl::token::ID {
            return Err(malformed(format!("owned by {}, expected the token program", account.owner)));
        }
        let token_account =
            TokenAccount::try_deserialize(&mut account.data.as_slice()).map_err(|e| malformed(e.to_string()))?;
        if token_account.mint != request.mint {
            return Err(malformed(format!("holds mint {}, expected {}", token_account.mint, request.mint)));
        }
        if token_account.amount < request.amount {
            return Err(BridgeError::InvalidAmount(format!(
                "balance {} is below transfer amount {}",
                token_account.amount, request.amount
            )));
        }
        debug!(%burn_token_account, balance = token_account.amount, "checked burn token account");

        let transaction = self.build(burn_token_account)?;
        self.step = TransferStep::Done;
        info!(
            amount = request.amount,
            destination_domain = request.destination_domain,
            mint = %request.mint,
            "built deposit_for_burn transaction"
        );
        Ok(Some(transaction))
    }

    fn build(&self, burn_token_account: Pubkey) -> Result<UnsignedTransaction> {
        let request = &self.request;
        let tmm = &self.programs.token_messenger_minter;

        let accounts = DepositForBurnAccounts {
            owner: request.owner,
            event_rent_payer: request.payer,
            sender_authority_pda: get_sender_authority_pda(tmm)?,
            burn_token_account,
            message_transmitter: get_message_transmitter_pda(&self.programs.message_transmitter)?,
            token_messenger: get_token_messenger_pda(tmm)?,
            remote_token_messenger: get_remote_token_messenger_pda(tmm, request.destination_domain)?,
            token_minter: get_token_minter_pda(tmm)?,
            local_token: get_local_token_pda(tmm, &request.mint)?,
            burn_token_mint: request.mint,
            message_sent_event_data: request.message_sent_event_data,
            message_transmitter_program: self.programs.message_transmitter,
            token_messenger_minter_program: *tmm,
            token_program: anchor_spl::token::ID,
            system_program: anchor_lang::system_program::ID,
            event_authority: get_event_authority_pda(tmm)?,
            program: *tmm,
        };
        let params = DepositForBurnParams {
            amount: request.amount,
            destination_domain: request.destination_domain,
            mint_recipient: request.mint_recipient,
        };

        Ok(UnsignedTransaction::new("deposit_for_burn", request.payer, vec![deposit_for_burn(&accounts, &params)?])
            .with_co_signer(request.owner)
            .with_co_signer(request.message_sent_event_data))
    }
}
