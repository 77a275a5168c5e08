use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use forecast_domain::{
    EventCatalog, Money, MonthlyExpense, MonthlyExpenseTable, RecurrenceRule, RecurringEvent,
};

use crate::ConfigError;

/// File name of the persisted balance inside the data directory.
pub const DEFAULT_BALANCE_FILE: &str = "finance_balance.json";

/// Largest value accepted for `max_horizon_days`; stays inside the monthly calendar search.
pub const HORIZON_DAYS_CEILING: u32 = 36_000;

/// Forecast settings and the recurring event catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub daily_expense: Money,
    pub major_expense_threshold: Money,
    pub low_balance_threshold: Money,
    pub default_horizon_days: u32,
    pub horizon_choices: Vec<u32>,
    pub max_horizon_days: u32,
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional balance file location. Relative paths resolve against the data directory.
    pub balance_file: Option<PathBuf>,

    pub events: Vec<RecurringEvent>,
    pub monthly_expenses: MonthlyExpenseTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            daily_expense: Money::from_cents(100_00),
            major_expense_threshold: Money::from_cents(300_00),
            low_balance_threshold: Money::from_cents(500_00),
            default_horizon_days: 20,
            horizon_choices: vec![7, 14, 20, 30],
            max_horizon_days: 3650,
            ui_color_enabled: true,
            balance_file: None,
            events: default_events(),
            monthly_expenses: default_monthly_expenses(),
        }
    }
}

impl Config {
    /// Builds the ordered event catalog: configured events first, then monthly expenses by day.
    pub fn catalog(&self) -> EventCatalog {
        EventCatalog::with_monthly_expenses(self.events.clone(), &self.monthly_expenses)
    }

    pub fn set_daily_expense(&mut self, amount: Money) -> Result<(), ConfigError> {
        if amount.is_negative() {
            return Err(ConfigError::Invalid(format!(
                "daily expense must not be negative (got {amount})"
            )));
        }
        self.daily_expense = amount.round_cents();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("daily_expense", self.daily_expense),
            ("major_expense_threshold", self.major_expense_threshold),
            ("low_balance_threshold", self.low_balance_threshold),
        ];
        for (field, value) in non_negative {
            if value.is_negative() {
                return Err(ConfigError::Invalid(format!(
                    "{field} must not be negative (got {value})"
                )));
            }
        }

        if !(1..=HORIZON_DAYS_CEILING).contains(&self.max_horizon_days) {
            return Err(ConfigError::Invalid(format!(
                "max_horizon_days must be between 1 and {HORIZON_DAYS_CEILING} (got {})",
                self.max_horizon_days
            )));
        }
        if let Some(days) = std::iter::once(&self.default_horizon_days)
            .chain(&self.horizon_choices)
            .find(|days| **days > self.max_horizon_days)
        {
            return Err(ConfigError::Invalid(format!(
                "horizon of {days} days exceeds max_horizon_days ({})",
                self.max_horizon_days
            )));
        }

        if let Some(day) = self
            .monthly_expenses
            .keys()
            .find(|day| !(1..=31).contains(*day))
        {
            return Err(ConfigError::Invalid(format!(
                "monthly expense day {day} is outside 1..=31"
            )));
        }

        for event in &self.events {
            let valid = match &event.rule {
                RecurrenceRule::Interval { period_days, .. } => *period_days > 0,
                RecurrenceRule::NthWeekdayOfMonth { n, .. } => (1..=5).contains(n),
                RecurrenceRule::DayOfMonth { day } => (1..=31).contains(day),
            };
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "event `{}` has an unusable rule: {:?}",
                    event.description, event.rule
                )));
            }
        }
        Ok(())
    }

    /// Balance file path: the override when set, otherwise [`DEFAULT_BALANCE_FILE`] in `data_dir`.
    pub fn resolve_balance_file(&self, data_dir: &Path) -> PathBuf {
        match &self.balance_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(DEFAULT_BALANCE_FILE),
        }
    }
}

fn default_events() -> Vec<RecurringEvent> {
    let pay_anchor = NaiveDate::from_ymd_opt(2025, 6, 13).expect("valid pay anchor date");
    vec![
        RecurringEvent::new(
            "Bi-weekly pay",
            Money::from_cents(2700_00),
            RecurrenceRule::interval(pay_anchor, 14),
        ),
        RecurringEvent::new(
            "Social Security",
            Money::from_cents(2600_00),
            RecurrenceRule::nth_weekday(Weekday::Wed, 4),
        ),
    ]
}

fn default_monthly_expenses() -> MonthlyExpenseTable {
    let rows: [(u32, &[(&str, i64)]); 20] = [
        (1, &[("Davis Schools Lunch", 20_00)]),
        (
            2,
            &[
                ("Kindle", 13_93),
                ("Audible", 16_03),
                ("Harp", 150_00),
                ("Kohls", 100_00),
                ("Grass Roots Coop", 158_76),
            ],
        ),
        (4, &[("Kindle", 12_86), ("Paypal Instant", 36_24)]),
        (5, &[("Mint mobile", 130_00)]),
        (6, &[("T-MOBILE Handset", 83_37), ("South Davis Rec", 40_00)]),
        (8, &[("Mint mobile", 130_76)]),
        (12, &[("JSB Guitar", 35_00), ("Mortgage", 930_00)]),
        (13, &[("Internet", 61_10)]),
        (15, &[("Netflix", 20_00), ("Claude", 22_00)]),
        (18, &[("Phone Rob", 124_64)]),
        (
            19,
            &[("ChatGPT", 20_00), ("CAP 1 Mike", 110_00), ("Sewer", 75_00)],
        ),
        (20, &[("Foundation Furnace", 110_00)]),
        (21, &[("Cap 1 Rob", 220_00), ("Merinda Harp", 50_00)]),
        (
            22,
            &[("Allstate Car insurance", 322_88), ("T-Mobile", 113_00)],
        ),
        (23, &[("Psych", 25_00)]),
        (25, &[("Car Payment", 420_00)]),
        (
            27,
            &[
                ("Ryan xfer", 300_00),
                ("Gas", 30_00),
                ("NYTimes", 25_00),
                ("Psych", 25_00),
                ("Paypal", 30_00),
            ],
        ),
        (28, &[("Paypal", 13_00)]),
        (
            29,
            &[
                ("Orthodontics", 119_00),
                ("Paypal 2", 26_95),
                ("Dominion", 74_00),
            ],
        ),
        (30, &[("Rose", 25_00), ("Paypal 2", 26_95)]),
    ];

    rows.iter()
        .map(|(day, items)| {
            let expenses = items
                .iter()
                .map(|(description, cents)| {
                    MonthlyExpense::new(*description, Money::from_cents(*cents))
                })
                .collect();
            (*day, expenses)
        })
        .collect()
}
