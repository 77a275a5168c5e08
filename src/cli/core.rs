//! Dispatch, error reporting, and argument parsing shared by the shell commands.

use std::io;

use forecast_config::ConfigError;
use forecast_core::CoreError;
use forecast_domain::Money;

pub use crate::errors::CliError;

use super::io as cli_io;
use super::registry::CommandEntry;
use super::shell::parse_command_line;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes one input line and runs the matching command.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        if let Some(name) = self.registry.closest(input) {
            cli_io::print_info(format!("Suggestion: `{}`?", name));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Input(message) => CommandError::InvalidArguments(message),
            other => CommandError::Message(other.to_string()),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Parses a signed amount such as `1500`, `-42.10` or `$1,250.00`.
pub(crate) fn parse_amount(input: &str) -> Result<Money, CommandError> {
    input.parse::<Money>().map_err(|_| {
        CommandError::InvalidArguments(format!(
            "invalid amount `{}` (examples: 1500, -42.10, $1,250.00)",
            input
        ))
    })
}

pub(crate) fn parse_horizon(input: &str) -> Result<u32, CommandError> {
    match input.trim().parse::<i64>() {
        Ok(days) if days < 0 => Err(CommandError::InvalidArguments(format!(
            "forecast horizon must be zero or more days (got {days})"
        ))),
        Ok(days) => u32::try_from(days).map_err(|_| {
            CommandError::InvalidArguments(format!("forecast horizon {days} is too large"))
        }),
        Err(_) => Err(CommandError::InvalidArguments(format!(
            "invalid horizon `{}` (expected a whole number of days)",
            input
        ))),
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    context: &mut ShellContext,
    lines: &[&str],
) -> Result<(), CliError> {
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use forecast_core::{BalanceStore, FixedClock};
    use tempfile::{tempdir, TempDir};

    fn script_context() -> (TempDir, ShellContext) {
        let dir = tempdir().expect("tempdir");
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let context =
            ShellContext::with_data_dir(CliMode::Script, dir.path().to_path_buf(), Box::new(clock))
                .expect("context");
        (dir, context)
    }

    #[test]
    fn parse_line_handles_quotes() {
        let tokens = parse_command_line("adjust -25 \"Coffee beans\"").unwrap();
        assert_eq!(tokens, vec!["adjust", "-25", "Coffee beans"]);
    }

    #[test]
    fn amounts_and_horizons_are_validated() {
        assert_eq!(parse_amount("$1,250.00").unwrap(), Money::from_cents(1_250_00));
        assert!(matches!(
            parse_amount("lots"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert_eq!(parse_horizon("30").unwrap(), 30);
        assert_eq!(parse_horizon("0").unwrap(), 0);
        assert!(parse_horizon("-1").is_err());
        assert!(parse_horizon("two").is_err());
    }

    #[test]
    fn script_sets_and_adjusts_balance() {
        let (_dir, mut context) = script_context();
        process_script(
            &mut context,
            &["balance set 1000", "adjust -250.50 Groceries", "exit"],
        )
        .expect("script");

        let record = context.store.load_balance().expect("load");
        assert_eq!(record.current_balance, Money::from_cents(749_50));
        assert!(!context.running);
    }

    #[test]
    fn daily_command_persists_config() {
        let (dir, mut context) = script_context();
        process_script(&mut context, &["daily 80"]).expect("script");

        assert_eq!(context.config.daily_expense, Money::from_cents(80_00));
        let reloaded = forecast_config::ConfigManager::with_base_dir(dir.path().to_path_buf())
            .expect("manager")
            .load()
            .expect("load");
        assert_eq!(reloaded.daily_expense, Money::from_cents(80_00));
    }

    #[test]
    fn horizons_above_the_configured_limit_are_refused() {
        let (_dir, mut context) = script_context();
        assert_eq!(context.resolve_horizon(&["3650"]).unwrap(), 3650);
        assert!(matches!(
            context.resolve_horizon(&["3651"]),
            Err(CommandError::InvalidArguments(message)) if message.contains("limited to 3650 days")
        ));
        assert_eq!(context.resolve_horizon(&[]).unwrap(), 20);

        process_script(&mut context, &["forecast 90000000"]).expect("script");
        assert!(context.running);
    }

    #[test]
    fn bad_arguments_do_not_end_the_session() {
        let (_dir, mut context) = script_context();
        process_script(
            &mut context,
            &["forecast -3", "daily -5", "balance set nope", "frobnicate"],
        )
        .expect("script");
        assert!(context.running);
        assert_eq!(context.last_command.as_deref(), Some("frobnicate"));
        assert_eq!(context.config.daily_expense, Money::from_cents(100_00));
    }
}
