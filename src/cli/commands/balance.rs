use forecast_core::{BalanceService, CurrencyFormatter};
use forecast_domain::BALANCE_TIMESTAMP_FORMAT;

use crate::cli::core::{parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgumentHint, CommandEntry};

const DEFAULT_ADJUSTMENT_NOTE: &str = "Balance adjustment";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "balance",
            "Show or set the current balance",
            "balance [set <amount>]",
            cmd_balance,
        )
        .with_arguments(ArgumentHint::Words(&["show", "set"])),
        CommandEntry::new(
            "adjust",
            "Add (or subtract, with a negative amount) to the current balance",
            "adjust <amount> [description]",
            cmd_adjust,
        ),
        CommandEntry::new(
            "daily",
            "Show or update the flat daily expense",
            "daily [amount]",
            cmd_daily,
        ),
    ]
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_balance(context),
        [action] if action.eq_ignore_ascii_case("show") => show_balance(context),
        [action, amount] if action.eq_ignore_ascii_case("set") => {
            let amount = parse_amount(amount)?.round_cents();
            let record = BalanceService::set(&context.store, context.clock.as_ref(), amount)?;
            io::print_success(format!(
                "Balance updated to {}",
                context.formatters.format_amount(record.current_balance)
            ));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: balance [set <amount>]".into(),
        )),
    }
}

fn show_balance(context: &ShellContext) -> CommandResult {
    let snapshot = context.balance_snapshot();
    let last_updated = snapshot
        .record
        .last_updated
        .map(|ts| ts.format(BALANCE_TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "never".into());
    io::print_two_column(&[
        (
            "Current balance",
            context
                .formatters
                .format_amount(snapshot.record.current_balance),
        ),
        ("Last updated", last_updated),
        ("Balance file", context.store.path().display().to_string()),
    ]);
    Ok(())
}

fn cmd_adjust(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((amount, note)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: adjust <amount> [description]".into(),
        ));
    };
    let delta = parse_amount(amount)?.round_cents();
    if delta.is_zero() {
        return Err(CommandError::InvalidArguments(
            "adjustment amount must not be zero".into(),
        ));
    }
    let description = if note.is_empty() {
        DEFAULT_ADJUSTMENT_NOTE.to_string()
    } else {
        note.join(" ")
    };

    let adjustment =
        BalanceService::adjust(&context.store, context.clock.as_ref(), delta, &description)?;
    io::print_success(adjustment.message);
    io::print_info(format!(
        "New balance: {}",
        context
            .formatters
            .format_amount(adjustment.record.current_balance)
    ));
    Ok(())
}

fn cmd_daily(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            io::print_info(format!(
                "Daily expenses: {}",
                context.formatters.format_amount(context.config.daily_expense)
            ));
            Ok(())
        }
        [amount] => {
            let amount = parse_amount(amount)?;
            let mut updated = context.config.clone();
            updated.set_daily_expense(amount)?;
            context.commit_config(updated)?;
            io::print_success(format!(
                "Daily expenses updated to {}",
                context.formatters.format_amount(context.config.daily_expense)
            ));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments("usage: daily [amount]".into())),
    }
}
