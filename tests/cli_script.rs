mod common;

use std::fs;

use chrono::{Duration, Utc};
use forecast_config::ConfigManager;
use forecast_domain::Money;
use predicates::prelude::*;
use predicates::str::contains;

use common::{data_dir, script_command};

#[test]
fn script_mode_sets_balance_and_forecasts() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("balance set 1000\nforecast 14\nexit\n")
        .assert()
        .success()
        .stdout(contains("Balance updated to $1,000.00"))
        .stdout(contains("Cash Flow Forecast: 14 days from 2025-06-01"))
        .stdout(contains("Starting balance"))
        .stdout(contains("2025-06-13"))
        .stdout(contains("Bi-weekly pay: +$2,700.00"))
        .stdout(contains("Daily Breakdown"));

    let json = fs::read_to_string(home.join("finance_balance.json")).unwrap();
    assert!(json.contains("\"current_balance\""), "{json}");
    assert!(json.contains("2025-06-01 00:00:00"), "{json}");
}

#[test]
fn adjustments_accumulate_across_sessions() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("balance set 500\n")
        .assert()
        .success();

    script_command(&home)
        .write_stdin("adjust -120.25 Car repair\nbalance\n")
        .assert()
        .success()
        .stdout(contains("Car repair: -120.25"))
        .stdout(contains("New balance: $379.75"))
        .stdout(contains("2025-06-01 00:00:00"));
}

#[test]
fn negative_outlook_is_reported() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("balance set 100\nforecast 7\nchart 7\n")
        .assert()
        .success()
        .stdout(contains("Balance goes negative! Lowest point:"))
        .stdout(contains("Chart shows negative balance! Minimum:"))
        .stdout(contains("Statistics"));
}

#[test]
fn forecast_without_arguments_uses_default_horizon() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("balance set 20000\nforecast\n")
        .assert()
        .success()
        .stdout(contains("Cash Flow Forecast: 20 days from 2025-06-01"))
        .stdout(contains("Balance looks healthy"));
}

#[test]
fn expenses_and_events_list_the_catalog() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("expenses\nevents\n")
        .assert()
        .success()
        .stdout(contains("Total monthly expenses:"))
        .stdout(contains("Expenses by Day"))
        .stdout(contains("Davis Schools Lunch"))
        .stdout(contains("Recurring Events (41)"))
        .stdout(contains("4th Wednesday of each month"))
        .stdout(contains("2025-06-25"));
}

#[test]
fn daily_and_config_changes_persist() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("daily 75\nconfig set currency_symbol €\nconfig set ui_color_enabled off\n")
        .assert()
        .success()
        .stdout(contains("Daily expenses updated to $75.00"))
        .stdout(contains("Configuration updated: currency_symbol = €"));

    script_command(&home)
        .write_stdin("daily\nconfig\n")
        .assert()
        .success()
        .stdout(contains("Daily expenses: €75.00"))
        .stdout(contains("Color output"))
        .stdout(contains("off"));

    let saved = ConfigManager::with_base_dir(home.clone())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(saved.daily_expense, Money::from_cents(75_00));
    assert_eq!(saved.currency_symbol, "€");
    assert!(!saved.ui_color_enabled);
}

#[test]
fn bad_input_is_reported_and_the_session_continues() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("forcast 7\nforecast -2\nbalance set lots\nbalance\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `forcast`"))
        .stdout(contains("Suggestion: `forecast`?"))
        .stdout(contains("forecast horizon must be zero or more days"))
        .stdout(contains("invalid amount `lots`"))
        .stdout(contains("Current balance"));
}

#[test]
fn corrupt_balance_file_falls_back_to_zero() {
    let home = data_dir();
    fs::write(home.join("finance_balance.json"), "{ not json").unwrap();
    script_command(&home)
        .write_stdin("balance\n")
        .assert()
        .success()
        .stdout(contains("Error loading balance"))
        .stdout(contains("$0.00"));
}

#[test]
fn adjust_refuses_to_overwrite_a_corrupt_balance_file() {
    let home = data_dir();
    let file = home.join("finance_balance.json");
    fs::write(&file, "{ not json").unwrap();
    script_command(&home)
        .write_stdin("adjust 25 Refund
")
        .assert()
        .success()
        .stdout(contains("adjustment not applied"))
        .stdout(contains("New balance").not());
    assert_eq!(fs::read_to_string(&file).unwrap(), "{ not json");
}

#[test]
fn help_and_version_describe_the_shell() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("help\nhelp adjust\nversion\nexit\nbalance\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("adjust <amount> [description]"))
        .stdout(contains(format!("Cash Forecast {}", env!("CARGO_PKG_VERSION"))))
        .stdout(contains("Build hash"))
        .stdout(contains("Current balance").not());
}

#[test]
fn invalid_pinned_date_fails_startup() {
    let home = data_dir();
    script_command(&home)
        .env("CASH_FORECAST_TODAY", "June 1st")
        .write_stdin("balance\n")
        .assert()
        .failure();
}

#[test]
fn unpinned_sessions_use_the_local_calendar_date() {
    // Kiritimati is UTC+14 all year, so its date differs from UTC for most of the day.
    let local_date = || (Utc::now() + Duration::hours(14)).date_naive();
    let home = data_dir();
    let before = local_date();
    let output = script_command(&home)
        .env_remove("CASH_FORECAST_TODAY")
        .env("TZ", "Pacific/Kiritimati")
        .write_stdin("forecast 0\n")
        .output()
        .unwrap();
    let after = local_date();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        [before, after]
            .iter()
            .any(|day| stdout.contains(&format!("0 days from {}", day.format("%Y-%m-%d")))),
        "{stdout}"
    );
}

#[test]
fn forecasts_past_the_horizon_limit_are_refused() {
    let home = data_dir();
    script_command(&home)
        .write_stdin("forecast 4000\nchart 90000000\nconfig set max_horizon_days 5000\nforecast 3700\n")
        .assert()
        .success()
        .stdout(contains("forecast horizon is limited to 3650 days (got 4000)"))
        .stdout(contains("forecast horizon is limited to 3650 days (got 90000000)"))
        .stdout(contains("Configuration updated: max_horizon_days = 5000"))
        .stdout(contains("Cash Flow Forecast: 3700 days from 2025-06-01"));
}
