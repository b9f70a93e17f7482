use dialoguer::{Input, Password};

use bytebank_core::{format::long_date, forms::LoginForm};

use crate::cli::commands::{require_login, CommandDefinition};
use crate::cli::context::ShellContext;
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "login",
            "Log in and load the account",
            "login <email> <password>",
            cmd_login,
        )
        .with_aliases(&["entrar"]),
        CommandDefinition::new("logout", "End the current session", "logout", cmd_logout),
        CommandDefinition::new(
            "balance",
            "Show the greeting and current balance",
            "balance",
            cmd_balance,
        )
        .with_aliases(&["saldo"]),
        CommandDefinition::new(
            "toggle-balance",
            "Show or hide the balance",
            "toggle-balance",
            cmd_toggle_balance,
        ),
        CommandDefinition::new(
            "reset",
            "Discard the stored account and start over from the demo data",
            "reset",
            cmd_reset,
        )
        .with_aliases(&["restaurar"]),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(user) = context.session().current_user() {
        output::warning(format!(
            "Already logged in as {}. Use `logout` first.",
            user.email
        ));
        return Ok(());
    }

    let (email, password) = match args {
        [email, password, ..] => (email.to_string(), password.to_string()),
        _ if context.can_prompt() => prompt_credentials(context, args.first().copied())?,
        [email] => (email.to_string(), String::new()),
        [] => (String::new(), String::new()),
    };

    let name = context
        .session_mut()
        .login(&LoginForm::new(email, password))?
        .name
        .clone();
    output::success(format!("Bem-vindo, {}!", name));
    cmd_balance(context, &[])
}

fn prompt_credentials(
    context: &ShellContext,
    email: Option<&str>,
) -> Result<(String, String), CommandError> {
    let email = match email {
        Some(email) => email.to_string(),
        None => Input::<String>::with_theme(context.theme())
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = Password::with_theme(context.theme())
        .with_prompt("Senha")
        .allow_empty_password(true)
        .interact()?;
    Ok((email, password))
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.session_mut().logout() {
        Some(user) => output::success(format!("Até logo, {}!", user.name)),
        None => output::warning("No user is logged in."),
    }
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let name = require_login(context)?;
    let session = context.session_mut();
    let today = session.accounts().clock().today();
    let label = session.balance_label()?;

    output::info(format!("Olá, {}! :)", name));
    output::info(long_date(today));
    output::section("Saldo");
    output::info("Conta Corrente");
    output::info(format!("  {}", label));
    Ok(())
}

fn cmd_toggle_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    require_login(context)?;
    let session = context.session_mut();
    let visible = session.toggle_balance();
    let label = session.balance_label()?;
    output::info(format!(
        "Saldo {}: {}",
        if visible { "visível" } else { "oculto" },
        label
    ));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    require_login(context)?;
    if !context.confirm("Descartar todas as transações e restaurar a conta de demonstração?")? {
        output::info("Nada foi alterado.");
        return Ok(());
    }
    let count = context.session_mut().reset_account()?.transactions.len();
    output::success(format!("Conta restaurada com {} transações de exemplo.", count));
    Ok(())
}
