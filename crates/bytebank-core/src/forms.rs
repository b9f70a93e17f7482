//! Form-layer validation for the transaction and login forms.
//!
//! Domain types accept any value; rejecting empty or zero input happens here,
//! before a service is called.

use std::fmt;

use bytebank_domain::TransactionType;

use crate::{auth_service::User, format::parse_brl};

pub const TYPE_REQUIRED: &str = "Por favor, selecione um tipo de transação.";
pub const AMOUNT_REQUIRED: &str = "O valor é obrigatório.";
pub const AMOUNT_NOT_ZERO: &str = "O valor da transação não pode ser zero.";
pub const AMOUNT_INVALID: &str = "Informe um valor válido.";
pub const LOGIN_FIELDS_REQUIRED: &str = "Por favor, preencha ambos os campos.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Type,
    Amount,
    Email,
    Password,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Type => "type",
            FormField::Amount => "amount",
            FormField::Email => "email",
            FormField::Password => "password",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Every problem found in one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl FormErrors {
    fn push(&mut self, field: FormField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|err| err.message).collect();
        f.write_str(&messages.join(" "))
    }
}

impl std::error::Error for FormErrors {}

/// Raw input of the "Nova transação" form.
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub kind: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidTransaction {
    pub kind: TransactionType,
    pub amount: f64,
}

impl TransactionForm {
    pub fn new(kind: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            amount: amount.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidTransaction, FormErrors> {
        let mut errors = FormErrors::default();

        let kind = self.kind.parse::<TransactionType>().ok();
        if kind.is_none() {
            errors.push(FormField::Type, TYPE_REQUIRED);
        }

        let amount = if self.amount.trim().is_empty() {
            errors.push(FormField::Amount, AMOUNT_REQUIRED);
            None
        } else {
            match parse_brl(&self.amount) {
                Some(value) if value == 0.0 => {
                    errors.push(FormField::Amount, AMOUNT_NOT_ZERO);
                    None
                }
                Some(value) => Some(value),
                None => {
                    errors.push(FormField::Amount, AMOUNT_INVALID);
                    None
                }
            }
        };

        match (kind, amount) {
            (Some(kind), Some(amount)) => Ok(ValidTransaction { kind, amount }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Any non-blank pair is accepted; the password is never checked.
    pub fn validate(&self) -> Result<User, FormErrors> {
        let mut errors = FormErrors::default();
        if self.email.trim().is_empty() {
            errors.push(FormField::Email, LOGIN_FIELDS_REQUIRED);
        } else if self.password.is_empty() {
            errors.push(FormField::Password, LOGIN_FIELDS_REQUIRED);
        }
        if errors.is_empty() {
            Ok(User::from_email(&self.email))
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typed_amounts() {
        let valid = TransactionForm::new("Deposit", "R$ 1.200,50")
            .validate()
            .expect("valid form");
        assert_eq!(valid.kind, TransactionType::Deposit);
        assert_eq!(valid.amount, 1200.5);
    }

    #[test]
    fn reports_missing_type_and_amount_together() {
        let errors = TransactionForm::new("", "  ").validate().unwrap_err();
        assert_eq!(errors.message_for(FormField::Type), Some(TYPE_REQUIRED));
        assert_eq!(errors.message_for(FormField::Amount), Some(AMOUNT_REQUIRED));
        assert_eq!(errors.errors.len(), 2);
    }

    #[test]
    fn rejects_zero_amount() {
        let errors = TransactionForm::new("Pagamento", "R$ 0,00")
            .validate()
            .unwrap_err();
        assert_eq!(errors.to_string(), AMOUNT_NOT_ZERO);
    }

    #[test]
    fn rejects_unparseable_amount() {
        let errors = TransactionForm::new("Transfer", "dez reais")
            .validate()
            .unwrap_err();
        assert_eq!(errors.message_for(FormField::Amount), Some(AMOUNT_INVALID));
        assert!(errors.message_for(FormField::Type).is_none());
    }

    #[test]
    fn rejects_amounts_beyond_f64_range() {
        let errors = TransactionForm::new("Deposit", "9".repeat(400))
            .validate()
            .unwrap_err();
        assert_eq!(errors.message_for(FormField::Amount), Some(AMOUNT_INVALID));
    }

    #[test]
    fn negative_amounts_pass_the_form() {
        let valid = TransactionForm::new("Payment", "-45,90").validate().unwrap();
        assert_eq!(valid.amount, -45.9);
    }

    #[test]
    fn login_requires_both_fields() {
        let err = LoginForm::new("ana@bytebank.com", "").validate().unwrap_err();
        assert_eq!(err.to_string(), LOGIN_FIELDS_REQUIRED);
        assert!(LoginForm::new("", "x").validate().is_err());

        let user = LoginForm::new("ana@bytebank.com", "x").validate().unwrap();
        assert_eq!(user.name, "ana");
    }
}
