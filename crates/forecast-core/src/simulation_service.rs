//! Day-by-day balance simulation over a fixed horizon.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use forecast_domain::{AppliedEvent, EventCatalog, Forecast, Money};

use crate::{
    calendar::{compute_occurrences, months_spanned, MAX_MONTH_LOOKAHEAD},
    CoreError,
};

pub struct SimulationService;

impl SimulationService {
    /// Folds the catalog's events and the flat daily expense into a running-balance ledger.
    ///
    /// Day 0 is `as_of` itself with no change; days `1..=horizon_days` follow it. The result
    /// depends only on the arguments, so callers capture "today" before invoking. Horizons whose
    /// end lies past [`MAX_MONTH_LOOKAHEAD`] months are rejected.
    pub fn simulate(
        starting_balance: Money,
        as_of: NaiveDate,
        horizon_days: i64,
        catalog: &EventCatalog,
        daily_flat_expense: Money,
    ) -> Result<Forecast, CoreError> {
        if horizon_days < 0 {
            return Err(CoreError::InvalidHorizon(horizon_days));
        }
        let end = Duration::try_days(horizon_days)
            .and_then(|span| as_of.checked_add_signed(span))
            .ok_or(CoreError::HorizonTooLong(horizon_days))?;
        if months_spanned(as_of, end) > MAX_MONTH_LOOKAHEAD {
            return Err(CoreError::HorizonTooLong(horizon_days));
        }

        let occurrence_sets: Vec<HashSet<NaiveDate>> = catalog
            .iter()
            .map(|event| compute_occurrences(&event.rule, as_of, end).into_iter().collect())
            .collect();

        let mut forecast = Forecast::begin(starting_balance, as_of, daily_flat_expense);
        for date in as_of.iter_days().skip(1).take(horizon_days as usize) {
            let applied = catalog
                .iter()
                .zip(&occurrence_sets)
                .filter(|(_, dates)| dates.contains(&date))
                .map(|(event, _)| AppliedEvent::new(event.description.clone(), event.amount))
                .collect();
            forecast.record_day(date, applied);
        }

        debug!(
            %as_of,
            horizon_days,
            events = catalog.len(),
            ending_balance = %forecast.ending_balance(),
            "forecast simulated"
        );
        Ok(forecast)
    }
}
