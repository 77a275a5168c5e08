//! forecast-config
//!
//! User-editable forecast settings: the flat daily expense, warning thresholds,
//! the recurring event catalog and the location of the balance file.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, DEFAULT_BALANCE_FILE, HORIZON_DAYS_CEILING};
