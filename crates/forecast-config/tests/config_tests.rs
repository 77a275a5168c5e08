use std::fs;

use chrono::Weekday;
use forecast_config::{Config, ConfigError, ConfigManager};
use forecast_domain::{Money, MonthlyExpense, RecurrenceRule};
use tempfile::tempdir;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let config = manager.load().expect("load");
    assert_eq!(config, Config::default());
    assert_eq!(config.currency_symbol, "$");
    assert_eq!(config.daily_expense, Money::from_cents(100_00));
    assert_eq!(config.default_horizon_days, 20);
    assert_eq!(
        config.events[1].rule,
        RecurrenceRule::nth_weekday(Weekday::Wed, 4)
    );
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert_eq!(
        manager.config_path(),
        dir.path().join("config").join("config.json")
    );

    let mut config = Config::default();
    config
        .set_daily_expense(Money::from_cents(75_25))
        .expect("daily expense");
    config.ui_color_enabled = false;
    config
        .monthly_expenses
        .entry(31)
        .or_default()
        .push(MonthlyExpense::new("Storage unit", Money::from_cents(49_99)));

    manager.save(&config).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, config);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(
        manager.config_path(),
        r#"{ "currency_symbol": "€", "daily_expense": "42.50" }"#,
    )
    .expect("write");

    let config = manager.load().expect("load");
    assert_eq!(config.currency_symbol, "€");
    assert_eq!(config.daily_expense, Money::from_cents(42_50));
    assert_eq!(config.events, Config::default().events);
    assert_eq!(config.monthly_expenses, Config::default().monthly_expenses);
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    fs::write(manager.config_path(), r#"{ "daily_expense": "-5" }"#).expect("write");
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));

    fs::write(manager.config_path(), r#"{ "monthly_expenses": { "32": [] } }"#).expect("write");
    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));

    fs::write(manager.config_path(), "not json").expect("write");
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}

#[test]
fn events_round_trip_with_tagged_rules() {
    let config = Config::default();
    let json = serde_json::to_value(&config).expect("serialize");
    assert_eq!(json["events"][0]["rule"]["kind"], "interval");
    assert_eq!(json["events"][0]["rule"]["anchor"], "2025-06-13");
    assert_eq!(json["events"][1]["rule"]["kind"], "nth_weekday_of_month");
}
