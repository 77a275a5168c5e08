//! JSON file persistence for the current balance record.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use forecast_core::{BalanceStore, CoreError};
use forecast_domain::BalanceRecord;
use tracing::info;

const TMP_SUFFIX: &str = "tmp";

/// Stores the balance record in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonBalanceStore {
    path: PathBuf,
}

impl JsonBalanceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BalanceStore for JsonBalanceStore {
    fn load_balance(&self) -> Result<BalanceRecord, CoreError> {
        if !self.path.exists() {
            return Ok(BalanceRecord::default());
        }
        load_balance_from_path(&self.path)
    }

    fn save_balance(&self, record: &BalanceRecord) -> Result<(), CoreError> {
        save_balance_to_path(record, &self.path)?;
        info!(path = %self.path.display(), "balance saved");
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Writes a balance record to `path` through a temporary sibling file.
pub fn save_balance_to_path(record: &BalanceRecord, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(record).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a balance record. Missing keys take their defaults; malformed JSON is an error.
pub fn load_balance_from_path(path: &Path) -> Result<BalanceRecord, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
