//! Mode dashboard executions: last run state and time of every report.
//!
//! Three Mode API calls are joined per organization:
//!
//! ```text
//! {organization}
//!   └─ GET /api/{organization}/spaces?filter=all            → dashboard_group_id
//!        └─ GET /api/{organization}/spaces/{id}/reports     → dashboard_id, last_run_resource_path
//!             └─ GET {last_run_resource_path}               → execution_state, execution_timestamp
//! ```
//!
//! Each joined record has its timestamp normalized to epoch seconds and is
//! mapped into a [`DashboardExecution`](dashmeta_core::DashboardExecution).
//!
//! # Example
//!
//! ```ignore
//! use dashmeta_core::Extractor;
//! use dashmeta_mode::{ModeDashboardConfig, ModeDashboardExecutionsExtractor};
//!
//! let config = ModeDashboardConfig::from_job_yaml(&std::fs::read_to_string("job.yaml")?)?;
//! let mut extractor = ModeDashboardExecutionsExtractor::new(config)?;
//! while let Some(execution) = extractor.extract()? {
//!     println!("{} {} {}", execution.key(), execution.execution_state, execution.execution_timestamp);
//! }
//! ```

pub mod config;
pub mod extractor;
pub mod query;

pub use config::ModeDashboardConfig;
pub use extractor::ModeDashboardExecutionsExtractor;
pub use query::build_query;
