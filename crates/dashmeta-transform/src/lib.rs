//! Dashmeta Transform: record transformers used after extraction.
//!
//! # Pipeline Flow
//!
//! ```text
//! Record → TimestampStringToEpoch → DictToModel<M> → M
//!            ISO-8601 → epoch        typed mapping
//! ```

mod dict_to_model;
mod timestamp;

pub use dict_to_model::DictToModel;
pub use timestamp::{TimestampStringToEpoch, TimestampToEpochConfig, DEFAULT_TIMESTAMP_FORMAT};

use dashmeta_core::{ChainedTransformer, FromRecord};

/// Scope names, for reading each transformer's configuration subtree.
pub mod scopes {
    pub const TIMESTAMP_STR_TO_EPOCH: &str = "transformer.timestamp_str_to_epoch";
    pub const DICT_TO_MODEL: &str = "transformer.dict_to_model";
}

/// Normalize one timestamp field, then map the record into `M`.
pub fn epoch_to_model<M: FromRecord + 'static>(
    timestamp: TimestampStringToEpoch,
) -> ChainedTransformer<M> {
    ChainedTransformer::new(vec![Box::new(timestamp)], Box::new(DictToModel::<M>::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmeta_core::DashboardExecution;
    use serde_json::json;

    #[test]
    fn test_epoch_to_model_chain() {
        let timestamp = TimestampStringToEpoch::new(
            TimestampToEpochConfig::default().with_fallback_field("execution_timestamp"),
        )
        .unwrap();
        let chain = epoch_to_model::<DashboardExecution>(timestamp);
        assert_eq!(chain.pipeline_id(), "timestamp_str_to_epoch→dict_to_model");

        let record = json!({
            "dashboard_group_id": "sp1",
            "dashboard_id": "r1",
            "execution_state": "succeeded",
            "execution_timestamp": "2021-01-01T00:00:00Z",
            "product": "mode",
        });
        let execution = chain
            .transform(record.as_object().cloned().unwrap())
            .unwrap();

        assert_eq!(execution.execution_timestamp, 1609459200);
        assert_eq!(execution.execution_state, "succeeded");
        assert_eq!(execution.product, "mode");
    }
}
