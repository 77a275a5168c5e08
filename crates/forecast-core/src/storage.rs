use std::path::Path;

use forecast_domain::BalanceRecord;

use crate::CoreError;

/// Abstraction over persistence backends holding the single current-balance record.
pub trait BalanceStore: Send + Sync {
    /// Loads the stored record. A missing record is `Ok(BalanceRecord::default())`.
    fn load_balance(&self) -> Result<BalanceRecord, CoreError>;
    fn save_balance(&self, record: &BalanceRecord) -> Result<(), CoreError>;
    fn location(&self) -> &Path;
}
