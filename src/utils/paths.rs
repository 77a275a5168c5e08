use std::{env, path::PathBuf};

use dirs::home_dir;

/// Overrides the data directory (config and balance file).
pub const HOME_ENV: &str = "CASH_FORECAST_HOME";

const DEFAULT_DIR_NAME: &str = ".cash_forecast";

/// Returns the application data directory, defaulting to `~/.cash_forecast`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
