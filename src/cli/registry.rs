//! The shell's command table: lookup, help ordering, near-miss suggestions and argument completion.

use strsim::levenshtein;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

/// Largest edit distance still offered as a suggestion for a mistyped command.
const SUGGESTION_DISTANCE: usize = 3;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Where tab completion finds candidates for a command's first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentHint {
    None,
    /// A fixed set of sub-actions such as `show` or `set`.
    Words(&'static [&'static str]),
    /// Any registered command name.
    CommandNames,
    /// The configured `horizon_choices`.
    HorizonChoices,
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
    pub arguments: ArgumentHint,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
            arguments: ArgumentHint::None,
        }
    }

    pub fn with_arguments(self, arguments: ArgumentHint) -> Self {
        Self { arguments, ..self }
    }

    /// Usage text after the command word, e.g. `<amount> [description]` for `adjust`.
    pub fn argument_usage(&self) -> Option<&'static str> {
        let rest = self.usage.strip_prefix(self.name)?.trim_start();
        (!rest.is_empty()).then_some(rest)
    }
}

/// Commands in registration order. Names are lowercase; lookups ignore case.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing an earlier command of the same name in place.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|known| known.name == entry.name) {
            Some(known) => *known = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn list(&self) -> Vec<&CommandEntry> {
        self.entries.iter().collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }

    /// Closest command name to a mistyped `input`, if any is near enough.
    pub fn closest(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .map(|(_, name)| name)
    }
}
