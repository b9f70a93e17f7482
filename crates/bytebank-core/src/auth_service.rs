//! Simulated authentication. State lives in memory only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Derives the display name from the local part of the email address.
    pub fn from_email(email: &str) -> Self {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email);
        Self::new(name, email)
    }
}

#[derive(Debug, Default)]
pub struct AuthService {
    current_user: Option<User>,
}

impl AuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Replaces any existing session user.
    pub fn login(&mut self, user: User) {
        tracing::info!(email = %user.email, "user logged in");
        self.current_user = Some(user);
    }

    /// Clears the session, returning the user that was logged in.
    pub fn logout(&mut self) -> Option<User> {
        let previous = self.current_user.take();
        if let Some(user) = previous.as_ref() {
            tracing::info!(email = %user.email, "user logged out");
        }
        previous
    }
}
