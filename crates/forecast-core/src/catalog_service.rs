//! Read-only reports over the event catalog.

use std::collections::BTreeMap;

use forecast_domain::{EventCatalog, Money, MonthlyExpense, RecurrenceRule};

/// Expenses falling on one day of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayExpenses {
    pub day: u32,
    pub expenses: Vec<MonthlyExpense>,
    pub total: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyExpenseSummary {
    pub days: Vec<DayExpenses>,
    pub total: Money,
}

pub struct CatalogService;

impl CatalogService {
    /// Groups day-of-month expenses by day (ascending) with per-day and monthly totals.
    pub fn monthly_expense_summary(catalog: &EventCatalog) -> MonthlyExpenseSummary {
        let mut by_day: BTreeMap<u32, Vec<MonthlyExpense>> = BTreeMap::new();
        for event in catalog.iter().filter(|event| event.is_expense()) {
            if let RecurrenceRule::DayOfMonth { day } = event.rule {
                by_day
                    .entry(day)
                    .or_default()
                    .push(MonthlyExpense::new(event.description.clone(), event.amount.abs()));
            }
        }

        let days: Vec<DayExpenses> = by_day
            .into_iter()
            .map(|(day, expenses)| DayExpenses {
                day,
                total: expenses.iter().map(|expense| expense.amount).sum(),
                expenses,
            })
            .collect();
        let total = days.iter().map(|group| group.total).sum();
        MonthlyExpenseSummary { days, total }
    }
}
