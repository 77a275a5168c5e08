//! Terminal rendering of a forecast: one row per day with a balance bar around a zero axis and a
//! smaller bar for that day's net change.

use chrono::NaiveDate;
use colored::Color;
use forecast_core::{CurrencyFormatter, DateFormatter};
use forecast_domain::{Forecast, Money, SummaryStats};
use rust_decimal::prelude::ToPrimitive;

use crate::cli::ui::style::UiStyle;

const DEFAULT_TERMINAL_WIDTH: usize = 80;
/// Columns taken by the date, change bar, balance, change and marker fields around the balance bar.
const RESERVED_COLUMNS: usize = 60;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 60;
/// Odd so the change axis sits in the middle column.
const CHANGE_BAR_WIDTH: usize = 9;

const POSITIVE_FILL: char = '█';
const NEGATIVE_FILL: char = '░';
const AXIS: char = '│';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Income,
    MajorExpense,
    BelowZero,
}

impl Marker {
    pub fn symbol(self) -> char {
        match self {
            Marker::Income => '+',
            Marker::MajorExpense => '!',
            Marker::BelowZero => '-',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Marker::Income => "income",
            Marker::MajorExpense => "major expense",
            Marker::BelowZero => "below zero",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    pub date: NaiveDate,
    pub balance: Money,
    pub change: Money,
    pub markers: Vec<Marker>,
    pub bar: String,
    pub change_bar: String,
}

impl ChartRow {
    fn tone(&self) -> Option<Color> {
        if self.markers.contains(&Marker::BelowZero) {
            Some(Color::Red)
        } else if self.markers.contains(&Marker::MajorExpense) {
            Some(Color::Yellow)
        } else if self.markers.contains(&Marker::Income) {
            Some(Color::Green)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct BalanceChart {
    rows: Vec<ChartRow>,
}

impl BalanceChart {
    /// Lays out one row per ledger entry. Markers are only set on projected days.
    pub fn build(forecast: &Forecast, stats: &SummaryStats, bar_width: usize) -> Self {
        let bar_width = bar_width.max(MIN_BAR_WIDTH);
        let scale = Scale::new(
            stats.minimum_balance.min(Money::ZERO),
            stats.maximum_balance.max(Money::ZERO),
            bar_width,
        );
        let largest_change = forecast
            .projected_days()
            .iter()
            .map(|entry| entry.net_change.abs())
            .max()
            .unwrap_or(Money::ZERO);

        let rows = forecast
            .entries()
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let mut markers = Vec::new();
                if idx > 0 {
                    if entry.has_income() {
                        markers.push(Marker::Income);
                    }
                    if stats.major_expense_days.contains(&entry.date) {
                        markers.push(Marker::MajorExpense);
                    }
                    if entry.running_balance.is_negative() {
                        markers.push(Marker::BelowZero);
                    }
                }
                ChartRow {
                    date: entry.date,
                    balance: entry.running_balance,
                    change: entry.net_change,
                    markers,
                    bar: scale.bar(entry.running_balance),
                    change_bar: change_bar(entry.net_change, largest_change),
                }
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    pub fn lines(
        &self,
        currency: &dyn CurrencyFormatter,
        dates: &dyn DateFormatter,
        style: &UiStyle,
    ) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        for row in &self.rows {
            let markers: String = row.markers.iter().map(|marker| marker.symbol()).collect();
            let change = if row.change.is_zero() {
                String::new()
            } else {
                currency.format_signed(row.change)
            };
            let line = format!(
                "{} {} {} {:>13} {:>12} {}",
                dates.format_date(row.date),
                row.bar,
                row.change_bar,
                currency.format_amount(row.balance),
                change,
                markers
            );
            lines.push(style.apply_tone(line.trim_end(), row.tone()));
        }
        lines.push(legend());
        lines
    }
}

fn legend() -> String {
    let markers = [Marker::Income, Marker::MajorExpense, Marker::BelowZero]
        .iter()
        .map(|marker| format!("{} {}", marker.symbol(), marker.label()))
        .collect::<Vec<_>>()
        .join("  ");
    format!(
        "{POSITIVE_FILL} balance/inflow  {NEGATIVE_FILL} overdrawn/outflow  {AXIS} zero  {markers}"
    )
}

/// Bar width that fits the current terminal, falling back to 80 columns.
pub fn terminal_bar_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| columns as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
        .saturating_sub(RESERVED_COLUMNS)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

struct Scale {
    low: f64,
    span: f64,
    width: usize,
    zero: usize,
}

impl Scale {
    fn new(low: Money, high: Money, width: usize) -> Self {
        let low = to_f64(low);
        let span = to_f64(high) - low;
        let mut scale = Self {
            low,
            span,
            width,
            zero: 0,
        };
        scale.zero = scale.column(0.0);
        scale
    }

    fn column(&self, value: f64) -> usize {
        if self.span <= 0.0 {
            return 0;
        }
        let ratio = (value - self.low) / self.span;
        let column = (ratio * (self.width - 1) as f64).round();
        (column.max(0.0) as usize).min(self.width - 1)
    }

    fn bar(&self, balance: Money) -> String {
        let value = to_f64(balance);
        let position = self.column(value);
        let (from, to) = (self.zero.min(position), self.zero.max(position));
        let fill = if balance.is_negative() {
            NEGATIVE_FILL
        } else {
            POSITIVE_FILL
        };
        (0..self.width)
            .map(|col| {
                if !balance.is_zero() && (from..=to).contains(&col) {
                    fill
                } else if col == self.zero {
                    AXIS
                } else {
                    ' '
                }
            })
            .collect()
    }
}

/// Net change drawn out from a centre axis, scaled so `largest` fills one half.
/// Any non-zero change gets at least one cell.
fn change_bar(change: Money, largest: Money) -> String {
    let half = CHANGE_BAR_WIDTH / 2;
    let cells = if change.is_zero() || largest.is_zero() {
        0
    } else {
        let ratio = to_f64(change.abs()) / to_f64(largest);
        ((ratio * half as f64).round() as usize).clamp(1, half)
    };
    (0..CHANGE_BAR_WIDTH)
        .map(|col| {
            if col == half {
                AXIS
            } else if change.is_negative() && col < half && half - col <= cells {
                NEGATIVE_FILL
            } else if change.is_positive() && col > half && col - half <= cells {
                POSITIVE_FILL
            } else {
                ' '
            }
        })
        .collect()
}

fn to_f64(amount: Money) -> f64 {
    amount.amount().to_f64().unwrap_or(0.0)
}
