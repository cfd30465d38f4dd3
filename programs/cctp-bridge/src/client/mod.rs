//! Bridge client: resolves the CCTP deployment for a network and turns transfer requests into lazy plans of
//! unsigned transactions.

mod redeem;
mod transaction;
mod transfer;

pub use redeem::*;
pub use transaction::*;
pub use transfer::*;

use std::str::FromStr;

use anchor_lang::prelude::*;
use tracing::{debug, info};

use crate::{
    config::{validate_config, BridgeConfig, Network},
    error::{BridgeError, ConfigError, Result},
    instructions::{reclaim_event_account, ReclaimEventAccountAccounts, ReclaimEventAccountParams},
    ledger::{LedgerAccount, LedgerQuery},
    state::{CctpAccount, MessageSent, TransferRecord, TransferStatus, UsedNonces},
    utils::{get_message_transmitter_pda, get_used_nonces_pda, nonce_position},
};

const MESSAGE_TRANSMITTER: &str = "MessageTransmitter";
const TOKEN_MESSENGER_MINTER: &str = "TokenMessengerMinter";

/// Program ids of one CCTP deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CctpPrograms {
    pub message_transmitter: Pubkey,
    pub token_messenger_minter: Pubkey,
}

#[derive(Debug, Clone)]
pub struct BridgeClient {
    network: Network,
    local_domain: u32,
    programs: CctpPrograms,
}

impl BridgeClient {
    /// Validates `config` and resolves both program ids, preferring configured overrides over Circle's deployment.
    ///
    /// A network without a deployment and without overrides is unsupported. Overriding only one of the two programs
    /// on such a network leaves the other one missing.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        validate_config(config)?;

        let network = config.network;
        let unresolved = |program: &'static str| {
            if config.programs.is_empty() {
                BridgeError::UnsupportedNetwork { network, program }
            } else {
                BridgeError::ContractNotFound { network, program }
            }
        };

        let message_transmitter = resolve_program(
            config.programs.message_transmitter.as_deref(),
            network.default_message_transmitter(),
            MESSAGE_TRANSMITTER,
        )?
        .ok_or_else(|| unresolved(MESSAGE_TRANSMITTER))?;
        let token_messenger_minter = resolve_program(
            config.programs.token_messenger_minter.as_deref(),
            network.default_token_messenger_minter(),
            TOKEN_MESSENGER_MINTER,
        )?
        .ok_or_else(|| unresolved(TOKEN_MESSENGER_MINTER))?;

        debug!(%network, %message_transmitter, %token_messenger_minter, "resolved cctp programs");

        Ok(Self {
            network,
            local_domain: config.local_domain,
            programs: CctpPrograms { message_transmitter, token_messenger_minter },
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn local_domain(&self) -> u32 {
        self.local_domain
    }

    pub fn programs(&self) -> &CctpPrograms {
        &self.programs
    }

    /// UsedNonces account tracking `nonce` of messages from `source_domain`.
    pub fn used_nonces_address(&self, source_domain: u32, nonce: u64) -> Result<Pubkey> {
        get_used_nonces_pda(&self.programs.message_transmitter, source_domain, nonce)
    }

    /// Whether the destination ledger already consumed `nonce` from `source_domain`.
    ///
    /// A missing bucket account means no nonce of the bucket was received yet.
    pub async fn is_nonce_used<L: LedgerQuery + ?Sized>(
        &self,
        ledger: &L,
        source_domain: u32,
        nonce: u64,
    ) -> Result<bool> {
        check_nonce_used(ledger, &self.programs, source_domain, nonce).await
    }

    pub async fn transfer_status<L: LedgerQuery + ?Sized>(
        &self,
        ledger: &L,
        transfer: &TransferRecord,
    ) -> Result<TransferStatus> {
        let used = self.is_nonce_used(ledger, transfer.source_domain(), transfer.nonce()).await?;
        Ok(if used { TransferStatus::Redeemed } else { TransferStatus::Pending })
    }

    /// Recovers the transfer initiated by the transaction `signature` from its MessageSent event account.
    pub async fn fetch_transfer<L: LedgerQuery + ?Sized>(&self, ledger: &L, signature: &str) -> Result<TransferRecord> {
        let transaction = ledger
            .get_transaction(signature)
            .await?
            .ok_or_else(|| BridgeError::AccountNotFound { role: "transaction", address: signature.to_string() })?;

        for key in &transaction.account_keys {
            let Some(account) = ledger.get_account(key).await? else {
                continue;
            };
            if !self.is_message_sent_account(&account) {
                continue;
            }

            let event = MessageSent::try_from_account_data(key, &account.data)?;
            let record = TransferRecord::from_message(&event.message)?;
            debug!(signature, event_account = %key, nonce = record.nonce(), "recovered transfer");
            return Ok(record);
        }

        Err(BridgeError::AccountNotFound { role: "message sent event account", address: signature.to_string() })
    }

    fn is_message_sent_account(&self, account: &LedgerAccount) -> bool {
        account.owner == self.programs.message_transmitter
            && account.data.starts_with(&MessageSent::discriminator())
    }

    /// Plans a `deposit_for_burn` of `request.amount` tokens towards `request.destination_domain`.
    pub fn transfer(&self, request: TransferRequest) -> Result<TransferPlan> {
        TransferPlan::new(self.programs, self.local_domain, request)
    }

    /// Plans the redemption of an attested message on this ledger.
    pub fn redeem(&self, request: RedeemRequest) -> Result<RedeemPlan> {
        RedeemPlan::new(self.programs, self.local_domain, request)
    }

    /// Builds the transaction returning the rent of an attested MessageSent account to `payee`.
    pub fn reclaim_event_account(
        &self,
        payee: Pubkey,
        message_sent_event_data: Pubkey,
        attestation: Vec<u8>,
    ) -> Result<UnsignedTransaction> {
        let accounts = ReclaimEventAccountAccounts {
            payee,
            message_transmitter: get_message_transmitter_pda(&self.programs.message_transmitter)?,
            message_sent_event_data,
            program: self.programs.message_transmitter,
        };
        let ix = reclaim_event_account(&accounts, &ReclaimEventAccountParams { attestation })?;

        info!(%payee, %message_sent_event_data, "built reclaim_event_account transaction");
        Ok(UnsignedTransaction::new("reclaim_event_account", payee, vec![ix]))
    }
}

fn resolve_program(configured: Option<&str>, default: Option<Pubkey>, program: &'static str) -> Result<Option<Pubkey>> {
    match configured {
        Some(address) => Pubkey::from_str(address).map(Some).map_err(|e| {
            ConfigError::ValidationFailed(vec![format!("programs: invalid {} address '{}': {}", program, address, e)])
                .into()
        }),
        None => Ok(default),
    }
}

pub(crate) async fn check_nonce_used<L: LedgerQuery + ?Sized>(
    ledger: &L,
    programs: &CctpPrograms,
    source_domain: u32,
    nonce: u64,
) -> Result<bool> {
    let position = nonce_position(nonce)?;
    let address = get_used_nonces_pda(&programs.message_transmitter, source_domain, nonce)?;

    let Some(account) = ledger.get_account(&address).await? else {
        debug!(source_domain, nonce, first_nonce = position.first_nonce, %address, "used nonces account absent");
        return Ok(false);
    };
    if account.owner != programs.message_transmitter {
        return Err(BridgeError::MalformedAccount {
            account: address,
            reason: format!("owned by {}, expected {}", account.owner, programs.message_transmitter),
        });
    }

    let used_nonces = UsedNonces::try_from_account_data(&address, &account.data)?;
    let used = used_nonces.is_nonce_used(nonce)?;
    debug!(source_domain, nonce, %address, used, "checked used nonce");
    Ok(used)
}
