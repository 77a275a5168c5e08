use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid horizon: {0} days (must be zero or more)")]
    InvalidHorizon(i64),
    #[error(
        "Horizon of {0} days reaches past the {} month calendar limit",
        crate::calendar::MAX_MONTH_LOOKAHEAD
    )]
    HorizonTooLong(i64),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
