use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Money;

/// Timestamp layout used in persisted balance files.
pub const BALANCE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Persisted account balance snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    #[serde(default)]
    pub current_balance: Money,
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
}

impl BalanceRecord {
    pub fn new(current_balance: Money, last_updated: NaiveDateTime) -> Self {
        Self {
            current_balance,
            last_updated: Some(last_updated),
        }
    }
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::BALANCE_TIMESTAMP_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(BALANCE_TIMESTAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|value| {
            NaiveDateTime::parse_from_str(value.trim(), BALANCE_TIMESTAMP_FORMAT)
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
