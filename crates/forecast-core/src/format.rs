use chrono::NaiveDate;

use forecast_domain::Money;

/// Formats money amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: Money) -> String;

    /// Like [`CurrencyFormatter::format_amount`] but always carries a leading sign.
    fn format_signed(&self, amount: Money) -> String {
        if amount.is_negative() {
            self.format_amount(amount)
        } else {
            format!("+{}", self.format_amount(amount))
        }
    }
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}
