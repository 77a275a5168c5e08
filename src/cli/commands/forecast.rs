use colored::Color;
use forecast_core::{CurrencyFormatter, DateFormatter, SimulationService, SummaryService};
use forecast_domain::{DayLedgerEntry, Forecast, Outlook, SummaryStats};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgumentHint, CommandEntry};
use crate::cli::ui::{
    chart::terminal_bar_width, style, BalanceChart, Table, TableColumn, TableRenderer,
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "forecast",
            "Project the balance day by day with summary metrics",
            "forecast [days]",
            cmd_forecast,
        )
        .with_arguments(ArgumentHint::HorizonChoices),
        CommandEntry::new(
            "chart",
            "Chart the projected balance with statistics",
            "chart [days]",
            cmd_chart,
        )
        .with_arguments(ArgumentHint::HorizonChoices),
    ]
}

struct ForecastRun {
    forecast: Forecast,
    stats: SummaryStats,
    outlook: Outlook,
}

/// Reads the stored balance fresh, captures today once, then simulates and summarizes.
fn run_forecast(context: &ShellContext, args: &[&str]) -> Result<ForecastRun, CommandError> {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments(
            "expected at most one argument: the number of days".into(),
        ));
    }
    let horizon = context.resolve_horizon(args)?;
    let snapshot = context.balance_snapshot();
    let config = &context.config;

    let forecast = SimulationService::simulate(
        snapshot.record.current_balance,
        context.today(),
        i64::from(horizon),
        &config.catalog(),
        config.daily_expense,
    )?;
    let stats = SummaryService::summarize(&forecast, config.major_expense_threshold);
    let outlook = SummaryService::assess_outlook(&stats, config.low_balance_threshold);
    Ok(ForecastRun {
        forecast,
        stats,
        outlook,
    })
}

fn cmd_forecast(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let run = run_forecast(context, args)?;
    let fmt = &context.formatters;

    io::print_section(format!(
        "Cash Flow Forecast: {} days from {}",
        run.forecast.horizon_days(),
        fmt.format_date(run.forecast.as_of())
    ));
    io::print_two_column(&[
        ("Starting balance", fmt.format_amount(run.stats.starting_balance)),
        (
            "Ending balance",
            format!(
                "{} ({})",
                fmt.format_amount(run.stats.ending_balance),
                fmt.format_signed(run.stats.total_change)
            ),
        ),
        ("Minimum balance", fmt.format_amount(run.stats.minimum_balance)),
        ("Maximum balance", fmt.format_amount(run.stats.maximum_balance)),
        ("Days negative", run.stats.days_negative.to_string()),
    ]);
    report_outlook(fmt, run.outlook);
    report_major_expense_days(fmt, &run.stats);

    let mut table = Table::new(
        Some("Daily Breakdown"),
        vec![
            TableColumn::new("Date", 10),
            TableColumn::new("Day", 9),
            TableColumn::new("Transactions", 12),
            TableColumn::new("Change", 10).right(),
            TableColumn::new("Balance", 10).right(),
        ],
    );
    for (idx, entry) in run.forecast.entries().iter().enumerate() {
        let (transactions, change) = if idx == 0 {
            ("Starting balance".to_string(), String::new())
        } else {
            (
                describe_transactions(fmt, &run.forecast, entry),
                fmt.format_signed(entry.net_change),
            )
        };
        table.add_toned_row(
            vec![
                fmt.format_date(entry.date),
                entry.weekday_name.clone(),
                transactions,
                change,
                fmt.format_amount(entry.running_balance),
            ],
            row_tone(idx, entry, &run.stats),
        );
    }
    TableRenderer::render(&table, &style());
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let run = run_forecast(context, args)?;
    let fmt = &context.formatters;

    io::print_section(format!(
        "Cash Flow Chart: {} days from {}",
        run.forecast.horizon_days(),
        fmt.format_date(run.forecast.as_of())
    ));
    let chart = BalanceChart::build(&run.forecast, &run.stats, terminal_bar_width());
    for line in chart.lines(fmt, fmt, &style()) {
        io::println_text(&line)?;
    }

    let income_days = run
        .forecast
        .projected_days()
        .iter()
        .filter(|entry| entry.has_income())
        .count();
    io::print_section("Statistics");
    io::print_two_column(&[
        ("Starting balance", fmt.format_amount(run.stats.starting_balance)),
        ("Ending balance", fmt.format_amount(run.stats.ending_balance)),
        ("Total change", fmt.format_signed(run.stats.total_change)),
        ("Minimum balance", fmt.format_amount(run.stats.minimum_balance)),
        ("Maximum balance", fmt.format_amount(run.stats.maximum_balance)),
        ("Days negative", run.stats.days_negative.to_string()),
        ("Income days", income_days.to_string()),
        (
            "Major expense days",
            run.stats.major_expense_days.len().to_string(),
        ),
    ]);
    if let Outlook::Negative { minimum } = run.outlook {
        io::print_error(format!(
            "Chart shows negative balance! Minimum: {}",
            fmt.format_amount(minimum)
        ));
    }
    Ok(())
}

/// `Daily expenses: -$100.00; Bi-weekly pay: +$2,700.00`, flat expense first.
fn describe_transactions<F>(fmt: &F, forecast: &Forecast, entry: &DayLedgerEntry) -> String
where
    F: CurrencyFormatter,
{
    let flat = forecast.daily_flat_expense();
    let daily = (!flat.is_zero())
        .then(|| format!("Daily expenses: {}", fmt.format_signed(-flat)));
    daily
        .into_iter()
        .chain(
            entry
                .applied_events
                .iter()
                .map(|event| format!("{}: {}", event.description, fmt.format_signed(event.amount))),
        )
        .collect::<Vec<_>>()
        .join("; ")
}

fn row_tone(idx: usize, entry: &DayLedgerEntry, stats: &SummaryStats) -> Option<Color> {
    if idx == 0 {
        None
    } else if entry.running_balance.is_negative() {
        Some(Color::Red)
    } else if stats.major_expense_days.contains(&entry.date) {
        Some(Color::Yellow)
    } else if entry.has_income() {
        Some(Color::Green)
    } else {
        None
    }
}

fn report_outlook<F: CurrencyFormatter>(fmt: &F, outlook: Outlook) {
    match outlook {
        Outlook::Negative { minimum } => io::print_error(format!(
            "Balance goes negative! Lowest point: {}",
            fmt.format_amount(minimum)
        )),
        Outlook::Low { ending } => io::print_warning(format!(
            "Low balance projected: ending at {}",
            fmt.format_amount(ending)
        )),
        Outlook::Healthy => io::print_success("Balance looks healthy"),
    }
}

fn report_major_expense_days<F: DateFormatter>(fmt: &F, stats: &SummaryStats) {
    if stats.major_expense_days.is_empty() {
        return;
    }
    let days = stats
        .major_expense_days
        .iter()
        .map(|date| fmt.format_date(*date))
        .collect::<Vec<_>>()
        .join(", ");
    io::print_info(format!("Major expense days: {days}"));
}
