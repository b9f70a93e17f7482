//! Application state for one user session.
//!
//! A [`Session`] is built with its services injected and owns every piece of
//! mutable state a front-end needs: who is logged in, the last account
//! snapshot, and whether the balance is shown. Logging out tears all of it
//! down.

use uuid::Uuid;

use bytebank_domain::{Account, Transaction, TransactionType};

use crate::{
    account_service::AccountService,
    auth_service::{AuthService, User},
    format::{format_brl, MASKED_BALANCE},
    forms::{FormErrors, LoginForm, TransactionForm},
    registration_service::RegistrationService,
    CoreError,
};

pub struct Session {
    auth: AuthService,
    accounts: AccountService,
    registration: RegistrationService,
    account: Option<Account>,
    show_balance: bool,
    show_balance_on_login: bool,
}

impl Session {
    pub fn new(accounts: AccountService) -> Self {
        Self {
            auth: AuthService::new(),
            accounts,
            registration: RegistrationService::new(),
            account: None,
            show_balance: false,
            show_balance_on_login: false,
        }
    }

    pub fn with_registration(mut self, registration: RegistrationService) -> Self {
        self.registration = registration;
        self
    }

    /// Whether the balance starts visible after each login.
    pub fn with_balance_visible_on_login(mut self, visible: bool) -> Self {
        self.show_balance_on_login = visible;
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub fn registration(&self) -> &RegistrationService {
        &self.registration
    }

    pub fn registration_mut(&mut self) -> &mut RegistrationService {
        &mut self.registration
    }

    /// Validates the login form, starts the session and loads the account.
    pub fn login(&mut self, form: &LoginForm) -> Result<&User, SessionError> {
        let user = form.validate()?;
        let account = self.accounts.get_account_data()?;
        self.auth.login(user);
        self.account = Some(account);
        self.show_balance = self.show_balance_on_login;
        self.auth.current_user().ok_or(SessionError::Core(CoreError::NotLoggedIn))
    }

    pub fn logout(&mut self) -> Option<User> {
        self.account = None;
        self.show_balance = false;
        self.registration = RegistrationService::with_delay(self.registration_delay());
        self.auth.logout()
    }

    fn registration_delay(&self) -> std::time::Duration {
        self.registration.delay()
    }

    fn ensure_logged_in(&self) -> Result<(), CoreError> {
        if self.auth.is_logged_in() {
            Ok(())
        } else {
            Err(CoreError::NotLoggedIn)
        }
    }

    /// Latest account snapshot, loading it on first access.
    pub fn account(&mut self) -> Result<&Account, CoreError> {
        self.ensure_logged_in()?;
        if self.account.is_none() {
            self.account = Some(self.accounts.get_account_data()?);
        }
        self.account.as_ref().ok_or(CoreError::NotLoggedIn)
    }

    pub fn add_transaction(
        &mut self,
        kind: TransactionType,
        amount: f64,
        description: Option<String>,
    ) -> Result<&Account, CoreError> {
        self.ensure_logged_in()?;
        let updated = self.accounts.add_transaction_now(kind, amount, description)?;
        Ok(&*self.account.insert(updated))
    }

    /// Validates the raw form input before adding the transaction.
    pub fn submit_transaction_form(
        &mut self,
        form: &TransactionForm,
        description: Option<String>,
    ) -> Result<&Account, SessionError> {
        let valid = form.validate()?;
        Ok(self.add_transaction(valid.kind, valid.amount, description)?)
    }

    pub fn delete_transactions(&mut self, ids: &[Uuid]) -> Result<&Account, CoreError> {
        self.ensure_logged_in()?;
        let updated = self.accounts.delete_transactions(ids)?;
        Ok(&*self.account.insert(updated))
    }

    /// Replaces the stored account with a freshly seeded one.
    pub fn reset_account(&mut self) -> Result<&Account, CoreError> {
        self.ensure_logged_in()?;
        let seeded = self.accounts.reset_account_data()?;
        Ok(&*self.account.insert(seeded))
    }

    pub fn transaction(&mut self, id: Uuid) -> Result<Transaction, CoreError> {
        self.account()?
            .transaction(id)
            .cloned()
            .ok_or(CoreError::TransactionNotFound(id))
    }

    pub fn show_balance(&self) -> bool {
        self.show_balance
    }

    pub fn toggle_balance(&mut self) -> bool {
        self.show_balance = !self.show_balance;
        self.show_balance
    }

    /// Balance as displayed on the dashboard, masked while hidden.
    pub fn balance_label(&mut self) -> Result<String, CoreError> {
        let show = self.show_balance;
        let balance = self.account()?.balance;
        Ok(if show {
            format_brl(balance)
        } else {
            MASKED_BALANCE.to_string()
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Form(#[from] FormErrors),
}
