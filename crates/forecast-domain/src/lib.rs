//! forecast-domain
//!
//! Pure domain models for cash forecasting (Money, recurrence rules, event catalog,
//! forecast ledger, balance record). No I/O, no CLI, no storage.

pub mod balance;
pub mod catalog;
pub mod forecast;
pub mod money;
pub mod recurrence;

pub use balance::*;
pub use catalog::*;
pub use forecast::*;
pub use money::*;
pub use recurrence::*;
