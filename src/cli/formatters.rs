use chrono::NaiveDate;
use forecast_core::{CurrencyFormatter, DateFormatter};
use forecast_domain::Money;

/// Formatter implementations backed by the active configuration's currency symbol.
#[derive(Debug, Clone)]
pub struct CliFormatters {
    currency_symbol: String,
}

impl CliFormatters {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }
}

impl CurrencyFormatter for CliFormatters {
    /// `$1,234.56`, or `-$1,234.56` for negative amounts.
    fn format_amount(&self, amount: Money) -> String {
        let digits = format!("{}", amount.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        let sign = if amount.round_cents().is_negative() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{symbol}{whole}.{fraction}",
            symbol = self.currency_symbol,
            whole = group_thousands(whole),
        )
    }
}

impl DateFormatter for CliFormatters {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
