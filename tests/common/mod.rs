#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use chrono::NaiveDate;
use forecast_config::ConfigManager;
use forecast_core::FixedClock;
use forecast_storage_json::JsonBalanceStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const TODAY: &str = "2025-06-01";

/// Creates a fresh data directory that outlives the calling test.
pub fn data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").expect("valid test date")
}

/// Config manager, balance store and a clock pinned to [`TODAY`], all backed by one temp dir.
pub fn setup_test_env() -> (ConfigManager, JsonBalanceStore, FixedClock) {
    let base = data_dir();
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let config = config_manager.load().expect("load default config");
    let store = JsonBalanceStore::new(config.resolve_balance_file(&base));
    (config_manager, store, FixedClock::new(today()))
}

/// CLI binary in script mode, isolated to `home`, with colors off and the date pinned.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cash_forecast_cli").expect("binary built");
    cmd.env("CASH_FORECAST_CLI_SCRIPT", "1")
        .env("CASH_FORECAST_HOME", home)
        .env("CASH_FORECAST_TODAY", TODAY)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}
