use thiserror::Error;

use bytebank_config::ConfigError;
use bytebank_core::{forms::FormErrors, CoreError, RegistrationError, SessionError};

/// Failures that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Terminal error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single command; reported and the shell keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Exit requested")]
    ExitRequested,
    #[error("Usage: {0}")]
    Usage(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Form(#[from] FormErrors),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type CommandResult = Result<(), CommandError>;

impl From<SessionError> for CommandError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Core(err) => CommandError::Core(err),
            SessionError::Form(err) => CommandError::Form(err),
        }
    }
}
