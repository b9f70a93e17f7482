pub mod commands;
mod context;
pub mod error;
pub mod output;
mod shell;

pub use context::{CliMode, LoopControl, ShellContext};
pub use error::{CliError, CommandError, CommandResult};
pub use shell::run_cli;
