use std::{
    env,
    fmt,
    io::{self, IsTerminal, Write},
};

use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use forecast_config::Config;

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::cli::ui::style;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

pub fn print_section(title: impl fmt::Display) {
    output::section(title);
}

/// Writes a pre-rendered line to stdout.
pub fn println_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")
}

/// Enables colored output only for a terminal, without `NO_COLOR`, when the config allows it.
pub fn apply_config(config: &Config) {
    let enabled = config.ui_color_enabled
        && io::stdout().is_terminal()
        && env::var_os("NO_COLOR").is_none();
    colored::control::set_override(enabled);
    style::refresh_style(enabled);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Lets the user pick a forecast horizon; the cursor starts on `default` when it is listed.
pub fn select_horizon(
    theme: &ColorfulTheme,
    choices: &[u32],
    default: u32,
) -> Result<u32, CommandError> {
    let labels: Vec<String> = choices.iter().map(|days| format!("{days} days")).collect();
    let initial = choices
        .iter()
        .position(|days| *days == default)
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Forecast horizon")
        .items(&labels)
        .default(initial)
        .interact()?;
    Ok(choices[index])
}

/// Prints aligned `label  value` pairs.
pub fn print_two_column<L: AsRef<str>>(rows: &[(L, String)]) {
    let width = rows
        .iter()
        .map(|(label, _)| label.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in rows {
        output::info(format!("  {:<width$}  {}", label.as_ref(), value));
    }
}
