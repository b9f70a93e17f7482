use dialoguer::{Input, Password};

use bytebank_core::{RegistrationError, RegistrationField, RegistrationService};

use crate::cli::commands::CommandDefinition;
use crate::cli::context::ShellContext;
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output;

const USAGE: &str = "register [name|email|password <value> | terms | submit]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "register",
        "Fill in and submit the sign-up form",
        USAGE,
        cmd_register,
    )
    .with_aliases(&["cadastro"])]
}

fn cmd_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_form(context),
        ["terms"] => {
            let accepted = context.session_mut().registration_mut().toggle_terms();
            output::info(format!(
                "Termos de uso {}.",
                if accepted { "aceitos" } else { "não aceitos" }
            ));
            Ok(())
        }
        ["submit"] => submit(context),
        [field] if context.can_prompt() => {
            let field = parse_field(field)?;
            let value = prompt_value(context, field)?;
            update_field(context, field, value)
        }
        [field, value @ ..] if !value.is_empty() => {
            let field = parse_field(field)?;
            update_field(context, field, value.join(" "))
        }
        _ => Err(CommandError::Usage(USAGE.into())),
    }
}

fn parse_field(field: &str) -> Result<RegistrationField, CommandError> {
    field
        .parse::<RegistrationField>()
        .map_err(CommandError::InvalidArgument)
}

fn prompt_value(context: &ShellContext, field: RegistrationField) -> Result<String, CommandError> {
    let value = match field {
        RegistrationField::Password => Password::with_theme(context.theme())
            .with_prompt("Senha")
            .interact()?,
        RegistrationField::Name | RegistrationField::Email => {
            Input::<String>::with_theme(context.theme())
                .with_prompt(field_label(field))
                .interact_text()?
        }
    };
    Ok(value)
}

fn field_label(field: RegistrationField) -> &'static str {
    match field {
        RegistrationField::Name => "Nome",
        RegistrationField::Email => "Email",
        RegistrationField::Password => "Senha",
    }
}

fn update_field(context: &mut ShellContext, field: RegistrationField, value: String) -> CommandResult {
    context
        .session_mut()
        .registration_mut()
        .update_field(field, value);
    output::success(format!("{} atualizado.", field_label(field)));
    Ok(())
}

fn show_form(context: &ShellContext) -> CommandResult {
    let registration = context.session().registration();
    let user = registration.user();
    output::section("Cadastro");
    output::info(format!("  Nome : {}", user.name));
    output::info(format!("  Email: {}", user.email));
    output::info(format!(
        "  Senha: {}",
        if user.password.is_empty() { "" } else { "********" }
    ));
    output::info(format!(
        "  Termos aceitos: {}",
        if registration.terms_accepted() { "sim" } else { "não" }
    ));
    Ok(())
}

fn submit(context: &mut ShellContext) -> CommandResult {
    let pending = {
        let _guard = context.runtime().enter();
        context.session().registration().submit()?
    };
    output::info("Enviando cadastro...");

    let interactive = context.can_prompt();
    let result = context.runtime().block_on(async move {
        if !interactive {
            return pending.wait().await;
        }
        let canceller = pending.canceller();
        tokio::select! {
            result = pending.wait() => result,
            _ = tokio::signal::ctrl_c() => {
                canceller.cancel();
                Err(RegistrationError::Cancelled)
            }
        }
    });

    let outcome = result?;
    tracing::info!(success = outcome.success, "registration finished");
    output::success("Conta criada com sucesso!");
    let delay = context.session().registration().delay();
    *context.session_mut().registration_mut() = RegistrationService::with_delay(delay);
    Ok(())
}
