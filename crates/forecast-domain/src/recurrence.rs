use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::Money;

/// Describes when a recurring event fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecurrenceRule {
    /// Fires on `anchor` and every `period_days` after it.
    Interval { anchor: NaiveDate, period_days: i64 },
    /// Fires once a month on the `n`-th `weekday` (1-based).
    NthWeekdayOfMonth { weekday: Weekday, n: u32 },
    /// Fires once a month on a fixed day number.
    DayOfMonth { day: u32 },
}

impl RecurrenceRule {
    pub fn interval(anchor: NaiveDate, period_days: i64) -> Self {
        RecurrenceRule::Interval {
            anchor,
            period_days,
        }
    }

    pub fn nth_weekday(weekday: Weekday, n: u32) -> Self {
        RecurrenceRule::NthWeekdayOfMonth { weekday, n }
    }

    pub fn day_of_month(day: u32) -> Self {
        RecurrenceRule::DayOfMonth { day }
    }

    /// Human readable schedule, e.g. "4th Wednesday of each month".
    pub fn label(&self) -> String {
        match self {
            RecurrenceRule::Interval {
                anchor,
                period_days: 14,
            } => format!("Bi-weekly from {}", anchor),
            RecurrenceRule::Interval {
                anchor,
                period_days: 7,
            } => format!("Weekly from {}", anchor),
            RecurrenceRule::Interval {
                anchor,
                period_days,
            } => format!("Every {} days from {}", period_days, anchor),
            RecurrenceRule::NthWeekdayOfMonth { weekday, n } => {
                format!("{} {} of each month", ordinal(*n), weekday_name(*weekday))
            }
            RecurrenceRule::DayOfMonth { day } => format!("Day {} of each month", day),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A named income or expense that repeats according to a [`RecurrenceRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub description: String,
    /// Signed amount: negative for expenses, positive for income.
    pub amount: Money,
    pub rule: RecurrenceRule,
}

impl RecurringEvent {
    pub fn new(description: impl Into<String>, amount: Money, rule: RecurrenceRule) -> Self {
        Self {
            description: description.into(),
            amount,
            rule,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }
}

/// Full English weekday name, matching `%A` formatting.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
