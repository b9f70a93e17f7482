//! Simulated sign-up flow.
//!
//! Nothing is sent anywhere: a submission waits for a fixed delay on the tokio
//! runtime and then reports success. The wait runs as its own task so a closed
//! form can cancel it through [`PendingSubmission::cancel`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::{AbortHandle, JoinHandle};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);
pub const TERMS_NOT_ACCEPTED_MESSAGE: &str = "É preciso aceitar os termos de uso.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    Name,
    Email,
    Password,
}

impl std::str::FromStr for RegistrationField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" | "nome" => Ok(RegistrationField::Name),
            "email" => Ok(RegistrationField::Email),
            "password" | "senha" => Ok(RegistrationField::Password),
            other => Err(format!("unknown registration field `{other}`")),
        }
    }
}

/// Result shape handed back to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RegistrationOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{}", TERMS_NOT_ACCEPTED_MESSAGE)]
    TermsNotAccepted,
    #[error("O envio do cadastro foi cancelado.")]
    Cancelled,
    #[error("Falha ao criar a conta.")]
    Failed,
}

impl RegistrationError {
    pub fn outcome(&self) -> RegistrationOutcome {
        RegistrationOutcome {
            success: false,
            message: Some(self.to_string()),
        }
    }
}

impl From<RegistrationError> for RegistrationOutcome {
    fn from(err: RegistrationError) -> Self {
        err.outcome()
    }
}

/// Handle to an in-flight submission.
#[derive(Debug)]
pub struct PendingSubmission {
    handle: JoinHandle<RegistrationOutcome>,
}

impl PendingSubmission {
    /// Aborts the simulated round trip. Has no effect once it finished.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Detached handle that can cancel the submission while [`PendingSubmission::wait`] runs.
    pub fn canceller(&self) -> SubmissionCanceller {
        SubmissionCanceller(self.handle.abort_handle())
    }

    pub async fn wait(self) -> Result<RegistrationOutcome, RegistrationError> {
        match self.handle.await {
            Ok(outcome) => Ok(outcome),
            Err(err) if err.is_cancelled() => {
                tracing::info!("registration submission cancelled");
                Err(RegistrationError::Cancelled)
            }
            Err(err) => {
                tracing::error!(error = %err, "registration task failed");
                Err(RegistrationError::Failed)
            }
        }
    }
}

#[derive(Debug)]
pub struct SubmissionCanceller(AbortHandle);

impl SubmissionCanceller {
    pub fn cancel(&self) {
        self.0.abort();
    }
}

/// Holds the sign-up form while the user fills it in.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    user: NewUser,
    terms_accepted: bool,
    delay: Duration,
}

impl Default for RegistrationService {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationService {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SUBMIT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            user: NewUser::default(),
            terms_accepted: false,
            delay,
        }
    }

    pub fn user(&self) -> &NewUser {
        &self.user
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn update_field(&mut self, field: RegistrationField, value: impl Into<String>) -> &NewUser {
        let value = value.into();
        match field {
            RegistrationField::Name => self.user.name = value,
            RegistrationField::Email => self.user.email = value,
            RegistrationField::Password => self.user.password = value,
        }
        &self.user
    }

    /// Flips the terms checkbox and returns its new state.
    pub fn toggle_terms(&mut self) -> bool {
        self.terms_accepted = !self.terms_accepted;
        self.terms_accepted
    }

    /// Starts the simulated submission. Must be called from within a tokio runtime.
    pub fn submit(&self) -> Result<PendingSubmission, RegistrationError> {
        if !self.terms_accepted {
            tracing::warn!("registration rejected: terms not accepted");
            return Err(RegistrationError::TermsNotAccepted);
        }

        tracing::info!(
            name = %self.user.name,
            email = %self.user.email,
            "submitting new user registration"
        );
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            RegistrationOutcome::succeeded()
        });
        Ok(PendingSubmission { handle })
    }

    /// Submits and waits for the outcome.
    pub async fn submit_and_wait(&self) -> Result<RegistrationOutcome, RegistrationError> {
        self.submit()?.wait().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RegistrationService {
        let mut service = RegistrationService::new();
        service.update_field(RegistrationField::Name, "Ana");
        service.update_field(RegistrationField::Email, "ana@bytebank.com");
        service.update_field(RegistrationField::Password, "segredo");
        service
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_when_terms_not_accepted() {
        let service = filled_form();

        let err = service.submit_and_wait().await.expect_err("must reject");

        assert_eq!(err, RegistrationError::TermsNotAccepted);
        let outcome = err.outcome();
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("É preciso aceitar os termos de uso."));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_the_simulated_delay() {
        let mut service = filled_form();
        assert!(service.toggle_terms());

        let started = tokio::time::Instant::now();
        let outcome = service.submit_and_wait().await.expect("submission succeeds");

        assert_eq!(outcome, RegistrationOutcome::succeeded());
        assert!(started.elapsed() >= DEFAULT_SUBMIT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_submission_reports_cancelled() {
        let mut service = filled_form();
        service.toggle_terms();

        let pending = service.submit().expect("terms accepted");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!pending.is_finished());
        pending.cancel();

        assert_eq!(pending.wait().await, Err(RegistrationError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn canceller_stops_a_submission_being_awaited() {
        let mut service = filled_form();
        service.toggle_terms();

        let pending = service.submit().expect("terms accepted");
        let canceller = pending.canceller();
        let closer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        assert_eq!(pending.wait().await, Err(RegistrationError::Cancelled));
        closer.await.expect("closer task");
    }

    #[test]
    fn toggling_terms_twice_restores_unchecked() {
        let mut service = RegistrationService::new();
        assert!(service.toggle_terms());
        assert!(!service.toggle_terms());
        assert!(!service.terms_accepted());
    }

    #[test]
    fn outcome_serializes_like_the_form_expects() {
        let json = serde_json::to_string(&RegistrationOutcome::succeeded()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("senha".parse::<RegistrationField>(), Ok(RegistrationField::Password));
        assert!("age".parse::<RegistrationField>().is_err());
    }
}
