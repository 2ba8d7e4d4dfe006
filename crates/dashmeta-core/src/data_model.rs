//! Data Model: flat records passed between query steps and transformers
use crate::stage::StageError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A flattened record: field name to JSON value.
pub type Record = Map<String, Value>;

/// A typed catalog model that can be built from a record.
pub trait FromRecord: Sized {
    /// Model name used in error messages (ex: "DashboardExecution")
    const MODEL: &'static str;

    fn from_record(record: Record) -> Result<Self, StageError>;
}

/// Build a record from `(name, value)` pairs.
pub fn record_from<I, K, V>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Copy of `base` with every field of `overlay` written over it.
pub fn merge(base: &Record, overlay: &Record) -> Record {
    let mut merged = base.clone();
    for (k, v) in overlay {
        merged.insert(k.clone(), v.clone());
    }
    merged
}

/// Deserialize a record into `T`, reporting failures against `model`.
pub fn deserialize_record<T: DeserializeOwned>(model: &str, record: Record) -> Result<T, StageError> {
    serde_json::from_value(Value::Object(record)).map_err(|e| StageError::Model {
        model: model.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overlay_wins() {
        let base = record_from([("a", "1"), ("b", "2")]);
        let overlay = record_from([("b", "3"), ("c", "4")]);

        let merged = merge(&base, &overlay);
        assert_eq!(merged.get("a"), Some(&json!("1")));
        assert_eq!(merged.get("b"), Some(&json!("3")));
        assert_eq!(merged.get("c"), Some(&json!("4")));
        // base untouched
        assert_eq!(base.get("b"), Some(&json!("2")));
    }
}
