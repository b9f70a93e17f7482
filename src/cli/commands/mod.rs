pub mod account;
pub mod config;
pub mod registration;
pub mod system;
pub mod transaction;

use bytebank_core::CoreError;

use crate::cli::context::ShellContext;
use crate::cli::error::{CommandError, CommandResult};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(account::definitions());
    commands.extend(transaction::definitions());
    commands.extend(registration::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

/// Name of the logged-in user, or [`CoreError::NotLoggedIn`].
pub(crate) fn require_login(context: &ShellContext) -> Result<String, CommandError> {
    context
        .session()
        .current_user()
        .map(|user| user.name.clone())
        .ok_or(CommandError::Core(CoreError::NotLoggedIn))
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    /// Portuguese or short spellings accepted besides `name`.
    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.aliases.iter().any(|alias| *alias == word)
    }
}

/// Commands in registration order; `help` lists them in that order.
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        Self { definitions }
    }

    /// Finds a command by name or alias.
    pub fn get(&self, word: &str) -> Option<&CommandDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.answers_to(word))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.definitions.iter()
    }

    /// Primary names only.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|definition| definition.name)
    }

    /// Names and aliases, for suggestions and completion.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions
            .iter()
            .flat_map(|definition| {
                std::iter::once(definition.name).chain(definition.aliases.iter().copied())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_word_is_unique() {
        let definitions = all_definitions();
        let registry = CommandRegistry::new(definitions);
        let mut words: Vec<&str> = registry.words().collect();
        let total = words.len();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), total);
        assert_eq!(registry.iter().next().map(|def| def.name), Some("login"));
    }

    #[test]
    fn aliases_resolve_to_their_command() {
        let registry = CommandRegistry::new(all_definitions());
        assert_eq!(registry.get("extrato").map(|def| def.name), Some("statement"));
        assert_eq!(registry.get("sair").map(|def| def.name), Some("exit"));
        assert!(registry.get("nope").is_none());
    }
}
