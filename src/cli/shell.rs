use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use colored::Colorize;
use forecast_core::{CurrencyFormatter, DateFormatter};
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::cli::registry::ArgumentHint;

/// Reads commands from stdin instead of the line editor when set.
pub const SCRIPT_ENV: &str = "CASH_FORECAST_CLI_SCRIPT";

/// Script lines starting with this are skipped.
const SCRIPT_COMMENT: char = '#';

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ForecastHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ForecastHelper::from_context(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output_info(banner(context));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if !run_line(context, trimmed)? {
                    break;
                }
                // `config set` may have changed the horizon choices.
                editor.set_helper(Some(ForecastHelper::from_context(context)));
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Runs newline-separated commands until input ends or `exit`; blank and `#` lines are skipped.
fn run_script<R: BufRead>(context: &mut ShellContext, input: R) -> Result<(), CliError> {
    for line in input.lines() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(SCRIPT_COMMENT) {
            continue;
        }
        if !run_line(context, trimmed)? {
            break;
        }
    }
    Ok(())
}

/// Returns `false` once the session should end.
fn run_line(context: &mut ShellContext, line: &str) -> Result<bool, CliError> {
    match context.process_line(line) {
        Ok(LoopControl::Continue) => Ok(true),
        Ok(LoopControl::Exit) => Ok(false),
        Err(err) => {
            context.report_error(err)?;
            Ok(true)
        }
    }
}

/// Greeting with the date being forecast from and the stored balance.
fn banner(context: &ShellContext) -> String {
    let snapshot = context.balance_snapshot();
    format!(
        "Cash Forecast for {}: balance {}, {} recurring events. Type `help` for commands, `exit` to leave.",
        context.formatters.format_date(context.today()),
        context
            .formatters
            .format_amount(snapshot.record.current_balance),
        context.config.catalog().len()
    )
}

struct CommandWords {
    name: &'static str,
    argument_usage: Option<&'static str>,
    arguments: Vec<String>,
}

/// Line-editor helper: completes command names and first arguments, hints the remaining usage.
struct ForecastHelper {
    commands: Vec<CommandWords>,
}

impl ForecastHelper {
    fn from_context(context: &ShellContext) -> Self {
        let horizons: Vec<String> = context
            .config
            .horizon_choices
            .iter()
            .map(u32::to_string)
            .collect();
        let names: Vec<String> = context.registry.names().map(str::to_string).collect();

        let mut commands: Vec<CommandWords> = context
            .registry
            .list()
            .into_iter()
            .map(|entry| CommandWords {
                name: entry.name,
                argument_usage: entry.argument_usage(),
                arguments: match entry.arguments {
                    ArgumentHint::None => Vec::new(),
                    ArgumentHint::Words(words) => words.iter().map(|w| w.to_string()).collect(),
                    ArgumentHint::CommandNames => names.clone(),
                    ArgumentHint::HorizonChoices => horizons.clone(),
                },
            })
            .collect();
        commands.sort_by_key(|command| command.name);
        Self { commands }
    }

    fn find(&self, name: &str) -> Option<&CommandWords> {
        self.commands
            .iter()
            .find(|command| command.name.eq_ignore_ascii_case(name))
    }

    /// Start offset of the word under the cursor and the words that can replace it.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let word_start = prefix
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        let current = prefix[word_start..].to_ascii_lowercase();
        let before: Vec<&str> = prefix[..word_start].split_whitespace().collect();

        let pool: Vec<&str> = match before.as_slice() {
            [] => self.commands.iter().map(|command| command.name).collect(),
            [command] => self
                .find(command)
                .map(|command| command.arguments.iter().map(String::as_str).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        let matches = pool
            .into_iter()
            .filter(|word| word.starts_with(&current))
            .map(str::to_string)
            .collect();
        (word_start, matches)
    }

    /// Usage after a command word followed by one space, e.g. `adjust ` hints `<amount> [description]`.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let name = line.trim_start().strip_suffix(' ')?;
        if name.is_empty() || name.contains(char::is_whitespace) {
            return None;
        }
        self.find(name)?.argument_usage.map(str::to_string)
    }
}

impl Helper for ForecastHelper {}

impl Completer for ForecastHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ForecastHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for ForecastHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for ForecastHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

/// Splits a command line into words, honoring shell-style quotes.
pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}
