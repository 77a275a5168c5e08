use forecast_config::Config;
use forecast_core::CurrencyFormatter;

use crate::cli::core::{parse_amount, parse_horizon, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{ArgumentHint, CommandEntry};

const SETTABLE_KEYS: &str = "currency_symbol|daily_expense|major_expense_threshold|\
low_balance_threshold|default_horizon_days|max_horizon_days|ui_color_enabled";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show settings and file locations, or change a setting",
        "config [show|json|set <key> <value>]",
        cmd_config,
    )
    .with_arguments(ArgumentHint::Words(&["show", "json", "set"]))]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action] if action.eq_ignore_ascii_case("json") => {
            let json = serde_json::to_string_pretty(&context.config)
                .map_err(|err| CommandError::Message(err.to_string()))?;
            io::println_text(&json)?;
            Ok(())
        }
        [action, key, value @ ..] if action.eq_ignore_ascii_case("set") && !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show|json|set <{SETTABLE_KEYS}> <value>]"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    let fmt = &context.formatters;
    let choices = config
        .horizon_choices
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    io::print_section("Configuration");
    io::print_two_column(&[
        ("Currency symbol", config.currency_symbol.clone()),
        ("Daily expense", fmt.format_amount(config.daily_expense)),
        (
            "Major expense threshold",
            fmt.format_amount(config.major_expense_threshold),
        ),
        (
            "Low balance threshold",
            fmt.format_amount(config.low_balance_threshold),
        ),
        (
            "Default horizon",
            format!("{} days", config.default_horizon_days),
        ),
        ("Horizon choices", choices),
        ("Horizon limit", format!("{} days", config.max_horizon_days)),
        ("Color output", on_off(config.ui_color_enabled).to_string()),
        ("Recurring events", config.catalog().len().to_string()),
        ("Data directory", context.data_dir.display().to_string()),
        (
            "Config file",
            context.config_manager.config_path().display().to_string(),
        ),
        ("Balance file", context.store.path().display().to_string()),
    ]);
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    apply_setting(&mut updated, key, value)?;
    context.commit_config(updated)?;
    io::apply_config(&context.config);
    io::print_success(format!("Configuration updated: {key} = {value}"));
    Ok(())
}

/// Applies one `key value` pair; `Config::validate` runs again when the config is saved.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> CommandResult {
    match key.to_ascii_lowercase().as_str() {
        "currency_symbol" => config.currency_symbol = value.to_string(),
        "daily_expense" => config.set_daily_expense(parse_amount(value)?)?,
        "major_expense_threshold" => config.major_expense_threshold = parse_amount(value)?,
        "low_balance_threshold" => config.low_balance_threshold = parse_amount(value)?,
        "default_horizon_days" => config.default_horizon_days = parse_horizon(value)?,
        "max_horizon_days" => config.max_horizon_days = parse_horizon(value)?,
        "ui_color_enabled" => config.ui_color_enabled = parse_switch(value)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{other}` (expected one of {SETTABLE_KEYS})"
            )))
        }
    }
    Ok(())
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "expected on/off, got `{value}`"
        ))),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
