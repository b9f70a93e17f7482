use crate::cli::commands::CommandDefinition;
use crate::cli::context::ShellContext;
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        )
        .with_aliases(&["ajuda"]),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit)
            .with_aliases(&["sair", "quit"]),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(command) => {
                output::section(command.name);
                output::info(format!("  {}", command.description));
                output::info(format!("  Usage: {}", command.usage));
                if !command.aliases.is_empty() {
                    output::info(format!("  Aliases: {}", command.aliases.join(", ")));
                }
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output::section("Commands");
    let width = context
        .registry()
        .names()
        .map(str::len)
        .max()
        .unwrap_or_default();
    for command in context.registry().iter() {
        output::info(format!(
            "  {:<width$}  {}",
            command.name,
            command.description,
            width = width
        ));
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
