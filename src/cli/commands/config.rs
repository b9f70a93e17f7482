use crate::cli::commands::CommandDefinition;
use crate::cli::context::{CliMode, ShellContext};
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output;

const USAGE: &str = "config [set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Show or change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        ["set", key, value] => set_config_value(context, key, value),
        _ => Err(CommandError::Usage(USAGE.into())),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = context.config();
    output::section("Configuração");
    output::info(format!("  currency              : {}", config.currency));
    output::info(format!("  account_key           : {}", config.account_key));
    output::info(format!("  registration_delay_ms : {}", config.registration_delay_ms));
    output::info(format!("  show_balance_on_login : {}", config.show_balance_on_login));
    output::info(format!("  ui_color_enabled      : {}", config.ui_color_enabled));
    output::info(format!("  file                  : {}", context.config_path().display()));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let interactive = context.mode() == CliMode::Interactive;
    let config = context.config_mut();
    match key {
        "show_balance_on_login" => config.show_balance_on_login = parse_flag(value)?,
        "ui_color_enabled" => {
            config.ui_color_enabled = parse_flag(value)?;
            output::set_color_enabled(config.ui_color_enabled && interactive);
        }
        "registration_delay_ms" => {
            config.registration_delay_ms = value.parse().map_err(|_| {
                CommandError::InvalidArgument(format!("`{}` is not a number of milliseconds.", value))
            })?
        }
        other => {
            return Err(CommandError::InvalidArgument(format!(
                "Unknown or read-only setting `{}`.",
                other
            )))
        }
    }
    context.persist_config()?;
    output::success(format!("Saved {} = {}.", key, value));
    Ok(())
}

fn parse_flag(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "sim" => Ok(true),
        "false" | "off" | "no" | "não" => Ok(false),
        _ => Err(CommandError::InvalidArgument(format!(
            "`{}` is not a valid flag (use true or false).",
            value
        ))),
    }
}
