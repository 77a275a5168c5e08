//! Reading and updating the persisted current balance.

use tracing::{info, warn};

use forecast_domain::{BalanceRecord, Money};

use crate::{storage::BalanceStore, time::Clock, CoreError};

/// Current balance plus the reason it fell back to zero, if it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub record: BalanceRecord,
    pub load_warning: Option<String>,
}

/// Outcome of a quick adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub record: BalanceRecord,
    pub message: String,
}

pub struct BalanceService;

impl BalanceService {
    /// Loads the stored balance, falling back to zero when the store cannot be read.
    pub fn current(store: &dyn BalanceStore) -> BalanceSnapshot {
        match store.load_balance() {
            Ok(record) => BalanceSnapshot {
                record,
                load_warning: None,
            },
            Err(err) => {
                warn!(path = %store.location().display(), error = %err, "using zero balance");
                BalanceSnapshot {
                    record: BalanceRecord::default(),
                    load_warning: Some(format!("Error loading balance: {err}")),
                }
            }
        }
    }

    /// Replaces the stored balance.
    pub fn set(
        store: &dyn BalanceStore,
        clock: &dyn Clock,
        amount: Money,
    ) -> Result<BalanceRecord, CoreError> {
        let record = BalanceRecord::new(amount, clock.now());
        store.save_balance(&record)?;
        info!(balance = %amount, "balance updated");
        Ok(record)
    }

    /// Adds `delta` to the stored balance and returns a `"<description>: <+/-delta>"` receipt.
    ///
    /// The stored record is read once. When it cannot be read nothing is written, so an unreadable
    /// file is never replaced by `0 + delta`.
    pub fn adjust(
        store: &dyn BalanceStore,
        clock: &dyn Clock,
        delta: Money,
        description: &str,
    ) -> Result<Adjustment, CoreError> {
        let current = match store.load_balance() {
            Ok(record) => record.current_balance,
            Err(err) => {
                warn!(path = %store.location().display(), error = %err, "adjustment refused");
                return Err(CoreError::Storage(format!(
                    "cannot read {}: {err}; adjustment not applied",
                    store.location().display()
                )));
            }
        };
        let record = Self::set(store, clock, current + delta)?;
        Ok(Adjustment {
            record,
            message: format!("{}: {}", description, delta.signed()),
        })
    }
}
