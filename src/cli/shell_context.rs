use std::path::PathBuf;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use forecast_config::{Config, ConfigManager};
use forecast_core::{BalanceService, BalanceSnapshot, Clock};
use forecast_storage_json::JsonBalanceStore;
use tracing::debug;

use super::{
    commands,
    core::{parse_horizon, CliError, CommandError},
    formatters::CliFormatters,
    io as cli_io,
    registry::CommandRegistry,
    system_clock::clock_from_env,
};
use crate::utils::paths::app_data_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: settings, the balance store, the clock and the
/// command table. The balance is re-read from the store on every use.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: JsonBalanceStore,
    pub clock: Box<dyn Clock>,
    pub formatters: CliFormatters,
    pub data_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let clock = clock_from_env()?;
        Self::with_data_dir(mode, app_data_dir(), clock)
    }

    pub fn with_data_dir(
        mode: CliMode,
        data_dir: PathBuf,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(data_dir.clone())?;
        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let store = JsonBalanceStore::new(config.resolve_balance_file(&data_dir));
        let formatters = CliFormatters::new(config.currency_symbol.clone());

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        debug!(data_dir = %data_dir.display(), ?mode, "shell context ready");
        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            store,
            clock,
            formatters,
            data_dir,
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        "cash-forecast> ".to_string()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Loads the stored balance, printing a warning when it had to fall back to zero.
    pub(crate) fn balance_snapshot(&self) -> BalanceSnapshot {
        let snapshot = BalanceService::current(&self.store);
        if let Some(warning) = &snapshot.load_warning {
            cli_io::print_warning(warning);
        }
        snapshot
    }

    /// Saves `updated` first; the in-memory settings only change once the write succeeded.
    pub(crate) fn commit_config(&mut self, updated: Config) -> Result<(), CommandError> {
        self.config_manager.save(&updated)?;
        self.formatters = CliFormatters::new(updated.currency_symbol.clone());
        self.config = updated;
        Ok(())
    }

    /// Horizon from the first argument; otherwise an interactive pick or the configured default.
    pub(crate) fn resolve_horizon(&self, args: &[&str]) -> Result<u32, CommandError> {
        if let Some(raw) = args.first() {
            let days = parse_horizon(raw)?;
            let limit = self.config.max_horizon_days;
            if days > limit {
                return Err(CommandError::InvalidArguments(format!(
                    "forecast horizon is limited to {limit} days (got {days})"
                )));
            }
            return Ok(days);
        }
        let default = self.config.default_horizon_days;
        if self.mode == CliMode::Interactive && !self.config.horizon_choices.is_empty() {
            return cli_io::select_horizon(&self.theme, &self.config.horizon_choices, default);
        }
        Ok(default)
    }
}
