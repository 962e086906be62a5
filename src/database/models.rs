use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// userId -> record, ordered so the persisted file is stable between saves.
pub type ShiftMap = BTreeMap<String, UserShiftRecord>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSession {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end: DateTime<Utc>,
}

impl ShiftSession {
    pub fn hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserShiftRecord {
    #[serde(default)]
    pub sessions: Vec<ShiftSession>,
    #[serde(default)]
    pub total: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub current_start: Option<DateTime<Utc>>,
}

impl UserShiftRecord {
    pub fn is_on_shift(&self) -> bool {
        self.current_start.is_some()
    }
}

pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    end.signed_duration_since(start).num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0)
}

/// Timestamps are written as RFC 3339 but older files may carry epoch milliseconds.
mod timestamp {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(DateTime<Utc>),
        EpochMillis(i64),
    }

    impl RawTimestamp {
        fn into_datetime<E: serde::de::Error>(self) -> Result<DateTime<Utc>, E> {
            match self {
                RawTimestamp::Text(dt) => Ok(dt),
                RawTimestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(ms)
                    .ok_or_else(|| E::custom(format!("epoch timestamp out of range: {}", ms))),
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawTimestamp::deserialize(deserializer)?.into_datetime()
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(raw) => raw.into_datetime().map(Some),
            None => Ok(None),
        }
    }
}
