//! Read-only ledger access.
//!
//! The bridge client never writes to the ledger. Every read it needs goes through `LedgerQuery`, which callers back
//! with an RPC client; `InMemoryLedger` serves tests and local tooling.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;

use crate::error::{BridgeError, Result};

/// Account as returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAccount {
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

/// Confirmed transaction, reduced to what transfer recovery needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransaction {
    pub signature: String,
    pub slot: u64,
    pub account_keys: Vec<Pubkey>,
}

/// Trait for querying ledger state.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Fetch an account, `None` if it does not exist.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>>;

    /// Fetch a confirmed transaction by signature, `None` if unknown.
    async fn get_transaction(&self, signature: &str) -> Result<Option<LedgerTransaction>>;
}

/// Simple in-memory ledger for tests and dry runs.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    accounts: Arc<RwLock<BTreeMap<Pubkey, LedgerAccount>>>,
    transactions: Arc<RwLock<HashMap<String, LedgerTransaction>>>,
}

fn poisoned<T>(_: T) -> BridgeError {
    BridgeError::Ledger("in-memory ledger lock poisoned".to_string())
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_account(&self, address: Pubkey, account: LedgerAccount) -> Result<()> {
        self.accounts.write().map_err(poisoned)?.insert(address, account);
        Ok(())
    }

    pub fn remove_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>> {
        Ok(self.accounts.write().map_err(poisoned)?.remove(address))
    }

    pub fn add_transaction(&self, transaction: LedgerTransaction) -> Result<()> {
        self.transactions
            .write()
            .map_err(poisoned)?
            .insert(transaction.signature.clone(), transaction);
        Ok(())
    }
}

#[async_trait]
impl LedgerQuery for InMemoryLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>> {
        let guard = self.accounts.read().map_err(poisoned)?;
        Ok(guard.get(address).cloned())
    }

    async fn get_transaction(&self, signature: &str) -> Result<Option<LedgerTransaction>> {
        let guard = self.transactions.read().map_err(poisoned)?;
        Ok(guard.get(signature).cloned())
    }
}
