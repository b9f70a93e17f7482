//! Account aggregate: running balance plus the transaction history.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::transaction::{Transaction, TransactionType};

/// Holds a balance and its transactions, newest first.
///
/// The balance is maintained incrementally by [`Account::add_transaction`] and
/// [`Account::delete_transactions`]; it is never recomputed from the history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub balance: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(balance: f64, transactions: Vec<Transaction>) -> Self {
        let mut account = Self {
            balance,
            transactions,
        };
        account.sort_newest_first();
        account
    }

    /// Records a new transaction, moves the balance by `amount`, and returns the new id.
    pub fn add_transaction(
        &mut self,
        kind: TransactionType,
        amount: f64,
        date: DateTime<Utc>,
        description: Option<String>,
    ) -> Uuid {
        let mut transaction = Transaction::new(kind, amount, date);
        if let Some(text) = description {
            transaction = transaction.with_description(text);
        }
        let id = transaction.id;
        self.transactions.push(transaction);
        self.balance += amount;
        self.sort_newest_first();
        id
    }

    /// Removes every transaction whose id is in `ids` and reverses its effect on the balance.
    ///
    /// Unknown ids are ignored. Returns the sum of the removed amounts.
    pub fn delete_transactions(&mut self, ids: &[Uuid]) -> f64 {
        if ids.is_empty() {
            return 0.0;
        }
        let targets: HashSet<Uuid> = ids.iter().copied().collect();
        let removed: f64 = self
            .transactions
            .iter()
            .filter(|txn| targets.contains(&txn.id))
            .map(|txn| txn.amount)
            .sum();
        self.transactions.retain(|txn| !targets.contains(&txn.id));
        self.balance -= removed;
        removed
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Stable sort by date, most recent first.
    pub fn sort_newest_first(&mut self) {
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn is_sorted_newest_first(&self) -> bool {
        self.transactions
            .windows(2)
            .all(|pair| pair[0].date >= pair[1].date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn add_moves_balance_and_keeps_newest_first() {
        let mut account = Account::new(100.0, Vec::new());
        account.add_transaction(TransactionType::Deposit, 20.0, day(1), None);
        account.add_transaction(TransactionType::Payment, -5.5, day(3), None);
        let middle = account.add_transaction(TransactionType::Transfer, 10.0, day(2), None);

        assert_eq!(account.balance, 124.5);
        assert!(account.is_sorted_newest_first());
        assert_eq!(account.transactions[1].id, middle);
    }

    #[test]
    fn delete_reverses_matching_amounts() {
        let mut account = Account::new(0.0, Vec::new());
        let a = account.add_transaction(TransactionType::Deposit, 50.0, day(1), None);
        let b = account.add_transaction(TransactionType::Payment, -20.0, day(2), None);
        account.add_transaction(TransactionType::Deposit, 7.0, day(3), None);

        let removed = account.delete_transactions(&[a, b]);

        assert_eq!(removed, 30.0);
        assert_eq!(account.balance, 7.0);
        assert_eq!(account.transactions.len(), 1);
    }

    #[test]
    fn delete_ignores_unknown_and_empty_ids() {
        let mut account = Account::new(10.0, Vec::new());
        account.add_transaction(TransactionType::Deposit, 5.0, day(1), None);
        let before = account.clone();

        assert_eq!(account.delete_transactions(&[]), 0.0);
        assert_eq!(account.delete_transactions(&[Uuid::new_v4()]), 0.0);
        assert_eq!(account, before);
    }

    #[test]
    fn equal_dates_keep_insertion_order() {
        let mut account = Account::new(0.0, Vec::new());
        let first = account.add_transaction(TransactionType::Deposit, 1.0, day(5), None);
        let second = account.add_transaction(TransactionType::Deposit, 2.0, day(5), None);
        let later = day(5) + Duration::seconds(1);
        let newest = account.add_transaction(TransactionType::Deposit, 3.0, later, None);

        let ids: Vec<Uuid> = account.transactions.iter().map(|txn| txn.id).collect();
        assert_eq!(ids, vec![newest, first, second]);
    }
}
