use std::env;

use chrono::{Local, NaiveDate, NaiveDateTime};
use forecast_core::{Clock, FixedClock};

use crate::cli::core::CommandError;

/// Pins "today" (YYYY-MM-DD) for reproducible sessions and scripted runs.
pub const TODAY_ENV: &str = "CASH_FORECAST_TODAY";

/// Real-time clock in the user's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// The system clock, or a [`FixedClock`] when [`TODAY_ENV`] is set.
pub fn clock_from_env() -> Result<Box<dyn Clock>, CommandError> {
    match env::var(TODAY_ENV) {
        Ok(raw) if !raw.trim().is_empty() => {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "{TODAY_ENV} must be a date in YYYY-MM-DD form (got `{raw}`)"
                ))
            })?;
            Ok(Box::new(FixedClock::new(date)))
        }
        _ => Ok(Box::new(SystemClock)),
    }
}
