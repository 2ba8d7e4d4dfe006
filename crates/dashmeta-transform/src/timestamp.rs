//! Timestamp string to epoch seconds.
//!
//! RFC 3339 values (`Z` or a numeric offset, optional fraction) are read
//! directly. Anything else is parsed with the configured `strftime` format and
//! taken as UTC. Integers are already epoch seconds and pass through.

use crate::scopes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use dashmeta_core::config::ConfigError;
use dashmeta_core::{Record, StageError, Transformer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampToEpochConfig {
    /// Record field to rewrite (required)
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for TimestampToEpochConfig {
    fn default() -> Self {
        Self {
            field_name: None,
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl TimestampToEpochConfig {
    /// Use `field` unless a field name is already configured.
    pub fn with_fallback_field(mut self, field: &str) -> Self {
        if self.field_name.is_none() {
            self.field_name = Some(field.to_string());
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct TimestampStringToEpoch {
    field_name: String,
    timestamp_format: String,
}

impl TimestampStringToEpoch {
    pub fn new(config: TimestampToEpochConfig) -> Result<Self, ConfigError> {
        let field_name = config
            .field_name
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing(format!("{}.field_name", scopes::TIMESTAMP_STR_TO_EPOCH)))?;

        Ok(Self {
            field_name,
            timestamp_format: config.timestamp_format,
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    fn to_epoch(&self, raw: &str) -> Result<i64, StageError> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.timestamp());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, &self.timestamp_format) {
            return Ok(Utc.from_utc_datetime(&naive).timestamp());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, &self.timestamp_format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&naive).timestamp());
            }
        }

        Err(StageError::InvalidValue {
            field: self.field_name.clone(),
            reason: format!(
                "`{}` is neither RFC 3339 nor `{}`",
                raw, self.timestamp_format
            ),
        })
    }
}

impl Transformer for TimestampStringToEpoch {
    fn id(&self) -> &'static str {
        scopes::TIMESTAMP_STR_TO_EPOCH
    }

    fn required_fields(&self) -> Vec<&str> {
        vec![self.field_name.as_str()]
    }

    fn transform(&self, mut record: Record) -> Result<Record, StageError> {
        let epoch = match record.get(&self.field_name) {
            Some(Value::String(raw)) => self.to_epoch(raw)?,
            Some(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap_or_default(),
            other => {
                return Err(StageError::InvalidValue {
                    field: self.field_name.clone(),
                    reason: format!("expected a timestamp string, got {:?}", other),
                })
            }
        };

        record.insert(self.field_name.clone(), Value::from(epoch));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stage() -> TimestampStringToEpoch {
        TimestampStringToEpoch::new(
            TimestampToEpochConfig::default().with_fallback_field("execution_timestamp"),
        )
        .unwrap()
    }

    fn epoch_of(value: Value) -> Result<Value, StageError> {
        let mut record = Record::new();
        record.insert("execution_timestamp".to_string(), value);
        stage()
            .transform(record)
            .map(|r| r["execution_timestamp"].clone())
    }

    #[test]
    fn test_utc_iso8601() {
        assert_eq!(epoch_of(json!("2021-01-01T00:00:00Z")).unwrap(), json!(1609459200));
    }

    #[test]
    fn test_fraction_and_offset() {
        assert_eq!(epoch_of(json!("2021-01-01T00:00:00.000Z")).unwrap(), json!(1609459200));
        assert_eq!(epoch_of(json!("2021-01-01T01:00:00+01:00")).unwrap(), json!(1609459200));
        assert_eq!(epoch_of(json!("2021-01-01T00:00:00+00:00")).unwrap(), json!(1609459200));
    }

    #[test]
    fn test_custom_format() {
        let stage = TimestampStringToEpoch::new(TimestampToEpochConfig {
            field_name: Some("ts".to_string()),
            timestamp_format: "%Y/%m/%d %H:%M".to_string(),
        })
        .unwrap();
        let mut record = Record::new();
        record.insert("ts".to_string(), json!("2021/01/01 00:01"));

        let out = stage.transform(record).unwrap();
        assert_eq!(out["ts"], json!(1609459260));
    }

    #[test]
    fn test_date_only_format() {
        let stage = TimestampStringToEpoch::new(TimestampToEpochConfig {
            field_name: Some("ts".to_string()),
            timestamp_format: "%Y-%m-%d".to_string(),
        })
        .unwrap();
        let mut record = Record::new();
        record.insert("ts".to_string(), json!("2021-01-02"));

        assert_eq!(stage.transform(record).unwrap()["ts"], json!(1609545600));
    }

    #[test]
    fn test_epoch_passes_through() {
        assert_eq!(epoch_of(json!(1609459200)).unwrap(), json!(1609459200));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            epoch_of(json!("yesterday")),
            Err(StageError::InvalidValue { .. })
        ));
        assert!(matches!(epoch_of(json!(null)), Err(StageError::InvalidValue { .. })));
    }

    #[test]
    fn test_field_name_required() {
        let err = TimestampStringToEpoch::new(TimestampToEpochConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing("transformer.timestamp_str_to_epoch.field_name".to_string())
        );
    }

    #[test]
    fn test_configured_field_wins_over_fallback() {
        let config = TimestampToEpochConfig {
            field_name: Some("completed_at".to_string()),
            ..Default::default()
        }
        .with_fallback_field("execution_timestamp");
        assert_eq!(config.field_name.as_deref(), Some("completed_at"));
    }
}
