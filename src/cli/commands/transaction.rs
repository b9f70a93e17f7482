use std::collections::HashSet;

use chrono::Datelike;
use dialoguer::{Input, Select};
use uuid::Uuid;

use bytebank_core::{
    format::{format_date, long_date, month_name, BrazilianFormatter, CurrencyFormatter},
    forms::TransactionForm,
};
use bytebank_domain::{Account, Transaction, TransactionType};

use crate::cli::commands::{require_login, CommandDefinition};
use crate::cli::context::ShellContext;
use crate::cli::error::{CommandError, CommandResult};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "add",
            "Record a transaction dated now",
            "add <type> <amount> [description...]",
            cmd_add,
        )
        .with_aliases(&["nova"]),
        CommandDefinition::new(
            "statement",
            "List transactions, newest first",
            "statement",
            cmd_statement,
        )
        .with_aliases(&["extrato"]),
        CommandDefinition::new(
            "show",
            "Show one transaction in detail",
            "show <n|id>",
            cmd_show,
        ),
        CommandDefinition::new(
            "delete",
            "Delete transactions and reverse their amounts",
            "delete <n|id>...",
            cmd_delete,
        )
        .with_aliases(&["excluir"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_login(context)?;
    let form = match args {
        [] if context.can_prompt() => {
            let kind = prompt_kind(context)?;
            TransactionForm::new(kind.label(), prompt_amount(context)?)
        }
        [kind] if context.can_prompt() => TransactionForm::new(*kind, prompt_amount(context)?),
        _ => TransactionForm::new(
            args.first().copied().unwrap_or_default(),
            args.get(1).copied().unwrap_or_default(),
        ),
    };
    let description = (args.len() > 2).then(|| args[2..].join(" "));

    context
        .session_mut()
        .submit_transaction_form(&form, description)?;
    output::success("Transação adicionada com sucesso!");
    Ok(())
}

fn prompt_kind(context: &ShellContext) -> Result<TransactionType, CommandError> {
    let labels: Vec<&str> = TransactionType::ALL.iter().map(|kind| kind.label()).collect();
    let selection = Select::with_theme(context.theme())
        .with_prompt("Tipo de transação")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(TransactionType::ALL[selection])
}

fn prompt_amount(context: &ShellContext) -> Result<String, CommandError> {
    Ok(Input::<String>::with_theme(context.theme())
        .with_prompt("Valor (R$)")
        .allow_empty(true)
        .interact_text()?)
}

fn cmd_statement(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    require_login(context)?;
    let currency = context.config().currency.clone();
    let account = context.session_mut().account()?;
    output::section("Extrato");
    if account.transactions.is_empty() {
        output::info("Nenhuma transação encontrada.");
        return Ok(());
    }
    for (index, transaction) in account.transactions.iter().enumerate() {
        output::info(statement_row(index + 1, transaction, &currency));
    }
    Ok(())
}

fn statement_row(position: usize, transaction: &Transaction, currency: &str) -> String {
    format!(
        "#{:<3} {:<9} {:<13} {:>14}  {}",
        position,
        month_name(transaction.date.month()),
        transaction.kind.label(),
        BrazilianFormatter.format_amount(transaction.amount, currency),
        format_date(transaction.date.date_naive())
    )
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_login(context)?;
    let [target] = args else {
        return Err(CommandError::Usage("show <n|id>".into()));
    };
    let id = resolve_target(context.session_mut().account()?, target)?;
    let transaction = context.session_mut().transaction(id)?;

    output::section("Transação");
    output::info(format!("  Id       : {}", transaction.id));
    output::info(format!("  Tipo     : {}", transaction.kind.label()));
    output::info(format!(
        "  Valor    : {} ({})",
        BrazilianFormatter.format_amount(transaction.amount, &context.config().currency),
        if transaction.is_credit() { "entrada" } else { "saída" }
    ));
    output::info(format!("  Data     : {}", long_date(transaction.date.date_naive())));
    if let Some(description) = &transaction.description {
        output::info(format!("  Descrição: {}", description));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_login(context)?;
    if args.is_empty() {
        return Err(CommandError::Usage("delete <n|id>...".into()));
    }

    let (ids, before) = {
        let account = context.session_mut().account()?;
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for target in args {
            let id = resolve_target(account, target)?;
            if seen.insert(id) {
                ids.push(id);
            }
        }
        (ids, account.transactions.len())
    };

    let prompt = format!("Excluir {} transação(ões)?", ids.len());
    if !context.confirm(&prompt)? {
        output::info("Nada foi excluído.");
        return Ok(());
    }

    let remaining = context
        .session_mut()
        .delete_transactions(&ids)?
        .transactions
        .len();
    let removed = before.saturating_sub(remaining);
    if removed == 0 {
        output::warning("Nenhuma transação correspondente.");
    } else {
        output::success(format!("{} transação(ões) excluída(s).", removed));
    }
    Ok(())
}

/// Accepts a statement position (`3`, or a quoted `"#3"`) or a transaction id.
fn resolve_target(account: &Account, target: &str) -> Result<Uuid, CommandError> {
    let token = target.trim();
    let position = token.strip_prefix('#').unwrap_or(token);
    if let Ok(position) = position.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| account.transactions.get(index))
            .map(|transaction| transaction.id)
            .ok_or_else(|| CommandError::InvalidArgument(format!("No transaction #{}.", position)));
    }
    Uuid::parse_str(token).map_err(|_| {
        CommandError::InvalidArgument(format!(
            "`{}` is neither a statement position nor a transaction id.",
            token
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytebank_core::seed_account;

    #[test]
    fn resolves_positions_and_ids() {
        let account = seed_account();
        let second = account.transactions[1].id;

        assert_eq!(resolve_target(&account, "2").unwrap(), second);
        assert_eq!(resolve_target(&account, "#2").unwrap(), second);
        assert_eq!(resolve_target(&account, &second.to_string()).unwrap(), second);
        assert!(resolve_target(&account, "0").is_err());
        assert!(resolve_target(&account, "#9").is_err());
        assert!(resolve_target(&account, "abc").is_err());
    }

    #[test]
    fn statement_rows_use_localized_fields() {
        let account = seed_account();
        let row = statement_row(1, &account.transactions[0], "BRL");
        assert!(row.starts_with("#1 "));
        assert!(row.contains("julho"));
        assert!(row.contains("Transferência"));
        assert!(row.contains("-R$ 500,00"));
        assert!(row.ends_with("21/07/2025"));
    }
}
