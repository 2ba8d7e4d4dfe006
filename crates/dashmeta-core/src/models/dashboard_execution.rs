//! Dashboard execution (run) model
//!
//! One execution of a dashboard, keyed under its dashboard so the catalog can
//! attach run state and time to the dashboard node.

use crate::data_model::{deserialize_record, FromRecord, Record};
use crate::stage::StageError;
use serde::{Deserialize, Serialize};

pub const LAST_EXECUTION_ID: &str = "_last_execution";
pub const LAST_SUCCESSFUL_EXECUTION_ID: &str = "_last_successful_execution";
pub const DEFAULT_CLUSTER: &str = "gold";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardExecution {
    pub dashboard_group_id: String,
    pub dashboard_id: String,
    /// Seconds since the Unix epoch
    pub execution_timestamp: i64,
    pub execution_state: String,
    #[serde(default = "default_execution_id")]
    pub execution_id: String,
    #[serde(default)]
    pub product: String,
    #[serde(default = "default_cluster")]
    pub cluster: String,
}

fn default_execution_id() -> String {
    LAST_EXECUTION_ID.to_string()
}

fn default_cluster() -> String {
    DEFAULT_CLUSTER.to_string()
}

impl DashboardExecution {
    /// Catalog key of the dashboard this execution belongs to
    pub fn dashboard_key(&self) -> String {
        format!(
            "{}_dashboard://{}.{}/{}",
            self.product, self.cluster, self.dashboard_group_id, self.dashboard_id
        )
    }

    /// Catalog key of this execution
    pub fn key(&self) -> String {
        format!("{}/execution/{}", self.dashboard_key(), self.execution_id)
    }
}

impl FromRecord for DashboardExecution {
    const MODEL: &'static str = "DashboardExecution";

    fn from_record(record: Record) -> Result<Self, StageError> {
        deserialize_record(Self::MODEL, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_record_applies_defaults_and_ignores_extras() {
        let execution = DashboardExecution::from_record(record(json!({
            "organization": "acme",
            "dashboard_group_id": "sp1",
            "dashboard_id": "r1",
            "last_run_resource_path": "/runs/1",
            "execution_state": "succeeded",
            "execution_timestamp": 1609459200,
            "product": "mode",
        })))
        .unwrap();

        assert_eq!(execution.execution_id, LAST_EXECUTION_ID);
        assert_eq!(execution.cluster, DEFAULT_CLUSTER);
        assert_eq!(execution.product, "mode");
        assert_eq!(execution.execution_timestamp, 1609459200);
    }

    #[test]
    fn test_keys() {
        let execution = DashboardExecution {
            dashboard_group_id: "sp1".to_string(),
            dashboard_id: "r1".to_string(),
            execution_timestamp: 0,
            execution_state: "failed".to_string(),
            execution_id: LAST_EXECUTION_ID.to_string(),
            product: "mode".to_string(),
            cluster: "gold".to_string(),
        };

        assert_eq!(execution.dashboard_key(), "mode_dashboard://gold.sp1/r1");
        assert_eq!(
            execution.key(),
            "mode_dashboard://gold.sp1/r1/execution/_last_execution"
        );
    }

    #[test]
    fn test_string_timestamp_is_rejected() {
        let err = DashboardExecution::from_record(record(json!({
            "dashboard_group_id": "sp1",
            "dashboard_id": "r1",
            "execution_state": "succeeded",
            "execution_timestamp": "2021-01-01T00:00:00Z",
        })))
        .unwrap_err();

        assert!(matches!(err, StageError::Model { ref model, .. } if model == "DashboardExecution"));
    }
}
