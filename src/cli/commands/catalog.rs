use chrono::Days;
use forecast_core::{compute_occurrences, CatalogService, CurrencyFormatter, DateFormatter};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{style, Table, TableColumn, TableRenderer};

/// How far ahead `events` looks for the next occurrence.
const NEXT_OCCURRENCE_WINDOW_DAYS: u64 = 366;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "expenses",
            "List monthly recurring expenses grouped by day",
            "expenses",
            cmd_expenses,
        ),
        CommandEntry::new(
            "events",
            "List every recurring event with its schedule",
            "events",
            cmd_events,
        ),
    ]
}

fn cmd_expenses(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_arguments(args, "expenses")?;
    let summary = CatalogService::monthly_expense_summary(&context.config.catalog());
    let fmt = &context.formatters;

    io::print_section("Monthly Recurring Expenses");
    io::print_info(format!(
        "Total monthly expenses: {}",
        fmt.format_amount(summary.total)
    ));

    let mut table = Table::new(
        Some("Expenses by Day"),
        vec![
            TableColumn::new("Day", 3).right(),
            TableColumn::new("Expenses", 20),
            TableColumn::new("Total", 10).right(),
        ],
    );
    for group in &summary.days {
        let items = group
            .expenses
            .iter()
            .map(|expense| format!("{} ({})", expense.description, fmt.format_amount(expense.amount)))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            group.day.to_string(),
            items,
            fmt.format_amount(group.total),
        ]);
    }
    TableRenderer::render(&table, &style());
    Ok(())
}

fn cmd_events(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    reject_arguments(args, "events")?;
    let catalog = context.config.catalog();
    let fmt = &context.formatters;
    let today = context.today();
    let horizon_end = today
        .checked_add_days(Days::new(NEXT_OCCURRENCE_WINDOW_DAYS))
        .unwrap_or(today);

    let mut table = Table::new(
        Some(format!("Recurring Events ({})", catalog.len())),
        vec![
            TableColumn::new("Description", 12),
            TableColumn::new("Amount", 10).right(),
            TableColumn::new("Schedule", 10),
            TableColumn::new("Next", 10),
        ],
    );
    for event in &catalog {
        let next = compute_occurrences(&event.rule, today, horizon_end)
            .first()
            .map(|date| fmt.format_date(*date))
            .unwrap_or_else(|| "-".into());
        table.add_row(vec![
            event.description.clone(),
            fmt.format_signed(event.amount),
            event.rule.label(),
            next,
        ]);
    }
    TableRenderer::render(&table, &style());
    Ok(())
}

fn reject_arguments(args: &[&str], usage: &str) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!("usage: {usage}")))
    }
}
