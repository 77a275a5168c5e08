use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Money, RecurrenceRule, RecurringEvent};

/// Entry in the day-of-month expense table. `amount` is the positive amount paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    pub description: String,
    pub amount: Money,
}

impl MonthlyExpense {
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// Day-of-month keyed table of miscellaneous expenses.
pub type MonthlyExpenseTable = BTreeMap<u32, Vec<MonthlyExpense>>;

/// Ordered, immutable collection of recurring events.
///
/// Order matters: events landing on the same day are applied in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalog {
    events: Vec<RecurringEvent>,
}

impl EventCatalog {
    pub fn new(events: Vec<RecurringEvent>) -> Self {
        Self { events }
    }

    /// Builds a catalog from named events followed by the expense table, expanded into
    /// `DayOfMonth` events with negated amounts in ascending day order.
    pub fn with_monthly_expenses(
        events: Vec<RecurringEvent>,
        table: &MonthlyExpenseTable,
    ) -> Self {
        let mut all = events;
        for (day, expenses) in table {
            all.extend(expenses.iter().map(|expense| {
                RecurringEvent::new(
                    expense.description.clone(),
                    -expense.amount.abs(),
                    RecurrenceRule::day_of_month(*day),
                )
            }));
        }
        Self { events: all }
    }

    pub fn events(&self) -> &[RecurringEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecurringEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventCatalog {
    type Item = &'a RecurringEvent;
    type IntoIter = std::slice::Iter<'a, RecurringEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
