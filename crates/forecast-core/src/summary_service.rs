//! Aggregate statistics over an already simulated [`Forecast`].

use forecast_domain::{Forecast, Money, Outlook, SummaryStats};

pub struct SummaryService;

impl SummaryService {
    /// Computes balance extremes, days below zero (day 0 excluded) and the days whose
    /// recurring expenses exceed `major_expense_threshold`.
    pub fn summarize(forecast: &Forecast, major_expense_threshold: Money) -> SummaryStats {
        let balances = forecast.entries().iter().map(|entry| entry.running_balance);
        let minimum_balance = balances.clone().min().unwrap_or(forecast.starting_balance());
        let maximum_balance = balances.max().unwrap_or(forecast.starting_balance());

        let projected = forecast.projected_days();
        let days_negative = projected
            .iter()
            .filter(|entry| entry.running_balance.is_negative())
            .count();
        let major_expense_days = projected
            .iter()
            .filter(|entry| entry.recurring_expense_total() > major_expense_threshold)
            .map(|entry| entry.date)
            .collect();

        SummaryStats {
            starting_balance: forecast.starting_balance(),
            ending_balance: forecast.ending_balance(),
            minimum_balance,
            maximum_balance,
            total_change: forecast.ending_balance() - forecast.starting_balance(),
            days_negative,
            major_expense_days,
        }
    }

    /// Classifies a summary: any negative balance first, then a low ending balance.
    pub fn assess_outlook(stats: &SummaryStats, low_balance_threshold: Money) -> Outlook {
        if stats.minimum_balance.is_negative() {
            Outlook::Negative {
                minimum: stats.minimum_balance,
            }
        } else if stats.ending_balance < low_balance_threshold {
            Outlook::Low {
                ending: stats.ending_balance,
            }
        } else {
            Outlook::Healthy
        }
    }
}
