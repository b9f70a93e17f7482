//! Loads, seeds, mutates and persists the account.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use bytebank_domain::{Account, Transaction, TransactionType};

use crate::{
    storage::StorageService,
    time::{Clock, SystemClock},
    CoreError,
};

/// Storage key the account document lives under unless configured otherwise.
pub const ACCOUNT_KEY: &str = "@bytebank/account-data";
pub const SEED_BALANCE: f64 = 2500.0;
/// Description given to transactions added without one from the dashboard.
pub const DEFAULT_DESCRIPTION: &str = "Nova Transação";

/// Orchestrates account persistence around every mutation.
pub struct AccountService {
    storage: StorageService,
    clock: Arc<dyn Clock>,
    key: String,
}

impl AccountService {
    pub fn new(storage: StorageService) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: StorageService, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            key: ACCOUNT_KEY.to_string(),
        }
    }

    /// Stores the account under a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Persists the account. JSON has no encoding for infinities or NaN, so a
    /// non-finite balance or amount is refused before anything is written.
    pub fn save_account_data(&self, account: &Account) -> Result<(), CoreError> {
        let finite = account.balance.is_finite()
            && account.transactions.iter().all(|txn| txn.amount.is_finite());
        if !finite {
            tracing::warn!(key = %self.key, "refused to save non-finite account");
            return Err(CoreError::AmountOutOfRange);
        }
        self.storage.set_item(&self.key, account)?;
        tracing::debug!(
            key = %self.key,
            balance = account.balance,
            transactions = account.transactions.len(),
            "account saved"
        );
        Ok(())
    }

    /// Returns the stored account, seeding and persisting the demo account on first use.
    pub fn get_account_data(&self) -> Result<Account, CoreError> {
        if let Some(mut account) = self.storage.get_item::<Account>(&self.key)? {
            account.sort_newest_first();
            tracing::debug!(key = %self.key, "account loaded");
            return Ok(account);
        }

        let account = seed_account();
        self.save_account_data(&account)?;
        tracing::info!(key = %self.key, "seeded demo account");
        Ok(account)
    }

    pub fn add_transaction(
        &self,
        kind: TransactionType,
        amount: f64,
        date: DateTime<Utc>,
        description: Option<String>,
    ) -> Result<Account, CoreError> {
        let mut account = self.get_account_data()?;
        let id = account.add_transaction(kind, amount, date, description);
        self.save_account_data(&account)?;
        tracing::info!(%id, %kind, amount, "transaction added");
        Ok(account)
    }

    /// Adds a transaction dated by the service clock.
    pub fn add_transaction_now(
        &self,
        kind: TransactionType,
        amount: f64,
        description: Option<String>,
    ) -> Result<Account, CoreError> {
        let description = description.or_else(|| Some(DEFAULT_DESCRIPTION.to_string()));
        self.add_transaction(kind, amount, self.clock.now(), description)
    }

    /// Drops the stored account; the next load seeds the demo data again.
    pub fn reset_account_data(&self) -> Result<Account, CoreError> {
        let removed = self.storage.remove_item(&self.key)?;
        tracing::info!(key = %self.key, removed, "account reset");
        self.get_account_data()
    }

    pub fn delete_transactions(&self, ids: &[Uuid]) -> Result<Account, CoreError> {
        let mut account = self.get_account_data()?;
        let before = account.transactions.len();
        let removed = account.delete_transactions(ids);
        self.save_account_data(&account)?;
        tracing::info!(
            requested = ids.len(),
            deleted = before - account.transactions.len(),
            removed,
            "transactions deleted"
        );
        Ok(account)
    }

    pub fn transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        self.get_account_data()?
            .transaction(id)
            .cloned()
            .ok_or(CoreError::TransactionNotFound(id))
    }
}

/// Fixed demo dataset used when nothing is stored yet.
pub fn seed_account() -> Account {
    Account::new(
        SEED_BALANCE,
        vec![
            Transaction::new(TransactionType::Transfer, -500.0, seed_date(21)),
            Transaction::new(TransactionType::Deposit, 50.0, seed_date(21)),
            Transaction::new(TransactionType::Deposit, 100.0, seed_date(21)),
            Transaction::new(TransactionType::Deposit, 150.0, seed_date(18)),
        ],
    )
}

fn seed_date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
