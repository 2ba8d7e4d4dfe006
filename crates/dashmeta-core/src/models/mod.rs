//! Catalog models produced by extractors
pub mod dashboard_execution;

pub use dashboard_execution::DashboardExecution;
