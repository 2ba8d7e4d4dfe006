//! Dashmeta Core: records, extractor/transformer contracts, and catalog models
//!
//! Extractors pull flat [`Record`]s from an upstream system one at a time. A
//! [`ChainedTransformer`] then runs each record through an ordered list of
//! [`Transformer`] stages and maps the result into a typed catalog model.
//!
//! ```text
//! Extractor::extract → Record → Transformer* → ModelStage → Model
//! ```

pub mod config;
pub mod context;
pub mod data_model;
pub mod error;
pub mod extractor;
pub mod models;
pub mod runner;
pub mod stage;

pub use config::ConfigError;
pub use context::ExtractionContext;
pub use data_model::{FromRecord, Record};
pub use error::{ExtractError, Result};
pub use extractor::{Extractor, Records};
pub use models::DashboardExecution;
pub use runner::ChainedTransformer;
pub use stage::{ModelStage, StageError, Transformer};
