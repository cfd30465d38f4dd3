use anchor_lang::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    client::{check_nonce_used, CctpPrograms, UnsignedTransaction},
    error::{BridgeError, Result},
    instructions::{
        create_associated_token_account_idempotent, receive_message, HandleReceiveMessageAccounts,
        ReceiveMessageAccounts, ReceiveMessageParams,
    },
    ledger::LedgerQuery,
    state::{CctpAccount, TokenPair, TransferRecord},
    utils::{
        get_associated_token_address, get_custody_token_pda, get_event_authority_pda, get_local_token_pda,
        get_message_transmitter_authority_pda, get_message_transmitter_pda, get_remote_token_messenger_pda,
        get_token_messenger_pda, get_token_minter_pda, get_token_pair_pda, get_used_nonces_pda, CctpMessage,
    },
};

/// Attested message to mint on this ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemRequest {
    pub message: Vec<u8>,
    pub attestation: Vec<u8>,
    /// Fee payer and `receive_message` caller.
    pub payer: Pubkey,
    /// Wallet owning the mint recipient, when it is an associated token account the plan may create.
    pub recipient_owner: Option<Pubkey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RedeemStep {
    CheckNonce,
    PrepareRecipient,
    Receive { local_mint: Pubkey },
    Done,
}

/// Lazy plan redeeming a transfer: nothing if its nonce is already used, otherwise an optional recipient account
/// creation followed by `receive_message`.
#[derive(Debug, Clone)]
pub struct RedeemPlan {
    programs: CctpPrograms,
    transfer: TransferRecord,
    attestation: Vec<u8>,
    payer: Pubkey,
    recipient_owner: Option<Pubkey>,
    step: RedeemStep,
}

impl RedeemPlan {
    pub(crate) fn new(programs: CctpPrograms, local_domain: u32, request: RedeemRequest) -> Result<Self> {
        let message = CctpMessage::new(&request.message)?;
        if message.destination_domain() != local_domain {
            return Err(BridgeError::InvalidDomain(format!(
                "message is destined to domain {}, local domain is {}",
                message.destination_domain(),
                local_domain
            )));
        }
        if message.recipient() != programs.token_messenger_minter {
            return Err(BridgeError::MalformedMessage("message recipient is not the TokenMessengerMinter"));
        }
        let destination_caller = message.destination_caller();
        if destination_caller != Pubkey::default() && destination_caller != request.payer {
            return Err(BridgeError::DestinationCallerMismatch { expected: destination_caller, actual: request.payer });
        }

        let transfer = TransferRecord::from_message(&request.message)?;
        Ok(Self {
            programs,
            transfer,
            attestation: request.attestation,
            payer: request.payer,
            recipient_owner: request.recipient_owner,
            step: RedeemStep::CheckNonce,
        })
    }

    pub fn transfer(&self) -> &TransferRecord {
        &self.transfer
    }

    pub fn is_done(&self) -> bool {
        self.step == RedeemStep::Done
    }

    /// Advances the plan, reading the ledger as needed. `None` once exhausted.
    ///
    /// A failed step leaves the plan where it was, so the call can be retried.
    pub async fn next<L: LedgerQuery + ?Sized>(&mut self, ledger: &L) -> Result<Option<UnsignedTransaction>> {
        loop {
            match self.step {
                RedeemStep::CheckNonce => {
                    let used = check_nonce_used(
                        ledger,
                        &self.programs,
                        self.transfer.source_domain(),
                        self.transfer.nonce(),
                    )
                    .await?;
                    if used {
                        warn!(
                            source_domain = self.transfer.source_domain(),
                            nonce = self.transfer.nonce(),
                            "nonce already used, nothing to redeem"
                        );
                        self.step = RedeemStep::Done;
                        return Ok(None);
                    }
                    self.step = RedeemStep::PrepareRecipient;
                }
                RedeemStep::PrepareRecipient => {
                    let local_mint = self.local_mint(ledger).await?;
                    let create_recipient = self.prepare_recipient(ledger, &local_mint).await?;
                    self.step = RedeemStep::Receive { local_mint };
                    if let Some(transaction) = create_recipient {
                        return Ok(Some(transaction));
                    }
                }
                RedeemStep::Receive { local_mint } => {
                    let transaction = self.build_receive_message(&local_mint)?;
                    self.step = RedeemStep::Done;
                    info!(
                        source_domain = self.transfer.source_domain(),
                        nonce = self.transfer.nonce(),
                        amount = self.transfer.amount(),
                        "built receive_message transaction"
                    );
                    return Ok(Some(transaction));
                }
                RedeemStep::Done => return Ok(None),
            }
        }
    }

    /// Local mint paired with the burned remote token.
    async fn local_mint<L: LedgerQuery + ?Sized>(&self, ledger: &L) -> Result<Pubkey> {
        let token_pair_address = get_token_pair_pda(
            &self.programs.token_messenger_minter,
            self.transfer.source_domain(),
            self.transfer.burn_token(),
        )?;
        let account = ledger
            .get_account(&token_pair_address)
            .await?
            .ok_or_else(|| BridgeError::account_not_found("token pair", &token_pair_address))?;

        let token_pair = TokenPair::try_from_account_data(&token_pair_address, &account.data)?;
        debug!(%token_pair_address, local_token = %token_pair.local_token, "resolved local mint");
        Ok(token_pair.local_token)
    }

    async fn prepare_recipient<L: LedgerQuery + ?Sized>(
        &self,
        ledger: &L,
        local_mint: &Pubkey,
    ) -> Result<Option<UnsignedTransaction>> {
        let recipient = *self.transfer.mint_recipient();
        if ledger.get_account(&recipient).await?.is_some() {
            debug!(%recipient, "mint recipient exists");
            return Ok(None);
        }

        // Only an associated token account of a known owner can be created on the recipient's behalf.
        let owner = match self.recipient_owner {
            Some(owner) if get_associated_token_address(&owner, local_mint)? == recipient => owner,
            _ => return Err(BridgeError::account_not_found("mint recipient token account", &recipient)),
        };

        let ix = create_associated_token_account_idempotent(&self.payer, &owner, local_mint)?;
        info!(%recipient, %owner, "built associated token account creation");
        Ok(Some(UnsignedTransaction::new("create_associated_token_account", self.payer, vec![ix])))
    }

    fn build_receive_message(&self, local_mint: &Pubkey) -> Result<UnsignedTransaction> {
        let mt = &self.programs.message_transmitter;
        let tmm = &self.programs.token_messenger_minter;
        let source_domain = self.transfer.source_domain();

        let (authority_pda, _bump) = get_message_transmitter_authority_pda(mt, tmm)?;
        let accounts = ReceiveMessageAccounts {
            payer: self.payer,
            caller: self.payer,
            authority_pda,
            message_transmitter: get_message_transmitter_pda(mt)?,
            used_nonces: get_used_nonces_pda(mt, source_domain, self.transfer.nonce())?,
            receiver: *tmm,
            system_program: anchor_lang::system_program::ID,
            event_authority: get_event_authority_pda(mt)?,
            program: *mt,
        };
        let remaining_accounts = HandleReceiveMessageAccounts {
            token_messenger: get_token_messenger_pda(tmm)?,
            remote_token_messenger: get_remote_token_messenger_pda(tmm, source_domain)?,
            token_minter: get_token_minter_pda(tmm)?,
            local_token: get_local_token_pda(tmm, local_mint)?,
            token_pair: get_token_pair_pda(tmm, source_domain, self.transfer.burn_token())?,
            recipient_token_account: *self.transfer.mint_recipient(),
            custody_token_account: get_custody_token_pda(tmm, local_mint)?,
            token_program: anchor_spl::token::ID,
            event_authority: get_event_authority_pda(tmm)?,
            program: *tmm,
        };
        let params = ReceiveMessageParams {
            message: self.transfer.message().to_vec(),
            attestation: self.attestation.clone(),
        };

        let ix = receive_message(&accounts, &remaining_accounts, &params)?;
        Ok(UnsignedTransaction::new("receive_message", self.payer, vec![ix]))
    }
}
