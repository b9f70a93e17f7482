//! Domain model for account transactions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(kind: TransactionType, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Keeps a previously issued identifier instead of the generated one.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Enumerates the kinds of monetary movement an account records.
pub enum TransactionType {
    Deposit,
    Transfer,
    Payment,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Deposit,
        TransactionType::Transfer,
        TransactionType::Payment,
    ];

    /// Portuguese label shown in selects and statements.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Deposit => "Depósito",
            TransactionType::Transfer => "Transferência",
            TransactionType::Payment => "Pagamento",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Transfer => "Transfer",
            TransactionType::Payment => "Payment",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTransactionTypeError(pub String);

impl fmt::Display for ParseTransactionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction type `{}`", self.0)
    }
}

impl std::error::Error for ParseTransactionTypeError {}

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    /// Accepts the English variant name or the Portuguese label, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_lowercase();
        TransactionType::ALL
            .into_iter()
            .find(|kind| {
                kind.to_string().to_lowercase() == needle || kind.label().to_lowercase() == needle
            })
            .ok_or_else(|| ParseTransactionTypeError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_type_key_and_omits_missing_description() {
        let date = Utc.with_ymd_and_hms(2025, 7, 21, 0, 0, 0).unwrap();
        let txn = Transaction::new(TransactionType::Deposit, 50.0, date);

        let json = serde_json::to_value(&txn).expect("serialize");
        assert_eq!(json["type"], "Deposit");
        assert_eq!(json["amount"], 50.0);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn deserializes_browser_style_dates() {
        let raw = r#"{
            "id": "6f1c1c2e-3d4b-4f0e-9a51-3f6b0c2f9d10",
            "type": "Transfer",
            "amount": -500,
            "date": "2025-07-21T00:00:00.000Z",
            "description": "Aluguel"
        }"#;

        let txn: Transaction = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(txn.kind, TransactionType::Transfer);
        assert_eq!(txn.amount, -500.0);
        assert_eq!(txn.date, Utc.with_ymd_and_hms(2025, 7, 21, 0, 0, 0).unwrap());
        assert_eq!(txn.description.as_deref(), Some("Aluguel"));
    }

    #[test]
    fn parses_english_and_portuguese_names() {
        assert_eq!(
            "deposit".parse::<TransactionType>(),
            Ok(TransactionType::Deposit)
        );
        assert_eq!(
            "Transferência".parse::<TransactionType>(),
            Ok(TransactionType::Transfer)
        );
        assert_eq!(
            " PAGAMENTO ".parse::<TransactionType>(),
            Ok(TransactionType::Payment)
        );
        assert!("refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn construction_accepts_zero_and_negative_amounts() {
        let now = Utc::now();
        assert_eq!(Transaction::new(TransactionType::Payment, 0.0, now).amount, 0.0);
        assert!(!Transaction::new(TransactionType::Payment, -10.0, now).is_credit());
    }

    #[test]
    fn ids_are_generated_unless_supplied() {
        let now = Utc::now();
        let a = Transaction::new(TransactionType::Deposit, 1.0, now);
        let b = Transaction::new(TransactionType::Deposit, 1.0, now);
        assert_ne!(a.id, b.id);

        let fixed = Uuid::new_v4();
        assert_eq!(a.with_id(fixed).id, fixed);
    }
}
