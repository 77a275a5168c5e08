//! forecast-core
//!
//! Forecasting engine: calendar rule engine, balance simulation, ledger summaries and the
//! services around them. Depends on forecast-domain. No terminal I/O, no direct file access.

pub mod balance_service;
pub mod calendar;
pub mod catalog_service;
pub mod error;
pub mod format;
pub mod simulation_service;
pub mod storage;
pub mod summary_service;
pub mod time;

#[cfg(test)]
mod tests;

pub use balance_service::*;
pub use calendar::compute_occurrences;
pub use catalog_service::*;
pub use error::CoreError;
pub use format::{CurrencyFormatter, DateFormatter};
pub use simulation_service::*;
pub use storage::BalanceStore;
pub use summary_service::*;
pub use time::{Clock, FixedClock};
