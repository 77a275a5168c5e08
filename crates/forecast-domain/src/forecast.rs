//! Per-day ledger produced by a simulation run.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{recurrence::weekday_name, Money};

/// A recurring event applied on a particular day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEvent {
    pub description: String,
    pub amount: Money,
}

impl AppliedEvent {
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// One row of the forecast ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLedgerEntry {
    pub date: NaiveDate,
    pub weekday_name: String,
    pub applied_events: Vec<AppliedEvent>,
    pub net_change: Money,
    pub running_balance: Money,
}

impl DayLedgerEntry {
    /// Sum of the recurring expenses applied this day, as a positive amount.
    ///
    /// The flat daily expense is never an applied event and is therefore excluded.
    pub fn recurring_expense_total(&self) -> Money {
        self.applied_events
            .iter()
            .filter(|event| event.amount.is_negative())
            .map(|event| event.amount.abs())
            .sum()
    }

    pub fn has_income(&self) -> bool {
        self.applied_events
            .iter()
            .any(|event| event.amount.is_positive())
    }
}

/// Ordered ledger covering `[as_of, as_of + horizon_days]`.
///
/// Entries can only be appended through [`Forecast::record_day`], which derives the
/// running balance from the previous entry, so the ledger invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    starting_balance: Money,
    as_of: NaiveDate,
    daily_flat_expense: Money,
    entries: Vec<DayLedgerEntry>,
}

impl Forecast {
    /// Starts a ledger with the synthetic as-of entry.
    pub fn begin(starting_balance: Money, as_of: NaiveDate, daily_flat_expense: Money) -> Self {
        let opening = DayLedgerEntry {
            date: as_of,
            weekday_name: weekday_name(as_of.weekday()).to_string(),
            applied_events: Vec::new(),
            net_change: Money::ZERO,
            running_balance: starting_balance,
        };
        Self {
            starting_balance,
            as_of,
            daily_flat_expense,
            entries: vec![opening],
        }
    }

    /// Appends the next day, charging the flat daily expense plus the applied events.
    pub fn record_day(&mut self, date: NaiveDate, applied_events: Vec<AppliedEvent>) {
        let net_change = applied_events
            .iter()
            .map(|event| event.amount)
            .sum::<Money>()
            - self.daily_flat_expense;
        let running_balance = self.ending_balance() + net_change;
        self.entries.push(DayLedgerEntry {
            date,
            weekday_name: weekday_name(date.weekday()).to_string(),
            applied_events,
            net_change,
            running_balance,
        });
    }

    pub fn starting_balance(&self) -> Money {
        self.starting_balance
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn daily_flat_expense(&self) -> Money {
        self.daily_flat_expense
    }

    pub fn horizon_days(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn entries(&self) -> &[DayLedgerEntry] {
        &self.entries
    }

    /// Entries for days `1..=horizon_days`.
    pub fn projected_days(&self) -> &[DayLedgerEntry] {
        &self.entries[1..]
    }

    pub fn ending_balance(&self) -> Money {
        self.entries
            .last()
            .map(|entry| entry.running_balance)
            .unwrap_or(self.starting_balance)
    }

    pub fn end_date(&self) -> NaiveDate {
        self.entries
            .last()
            .map(|entry| entry.date)
            .unwrap_or(self.as_of)
    }
}

/// Aggregate statistics derived from a [`Forecast`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub starting_balance: Money,
    pub ending_balance: Money,
    pub minimum_balance: Money,
    pub maximum_balance: Money,
    pub total_change: Money,
    pub days_negative: usize,
    pub major_expense_days: Vec<NaiveDate>,
}

/// Overall health verdict for a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outlook {
    Negative { minimum: Money },
    Low { ending: Money },
    Healthy,
}
