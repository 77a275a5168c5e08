#![doc(test(attr(deny(warnings))))]

//! Cash Forecast projects a personal cash balance forward day by day from a stored current
//! balance, a catalog of recurring income and expenses, and a flat daily spending estimate.
//!
//! The engine lives in the `forecast-*` workspace crates; this crate wires them into the
//! `cash_forecast_cli` terminal shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cash Forecast tracing initialized.");
    });
}
