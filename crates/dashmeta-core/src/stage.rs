//! Transformer Trait: contract for every record transformation stage
use crate::data_model::Record;

/// A single record-to-record transformation.
pub trait Transformer: Send + Sync {
    /// Configuration scope of the stage (ex: "transformer.timestamp_str_to_epoch")
    fn id(&self) -> &'static str;

    /// Fields the stage reads. The runner checks them before calling `transform`.
    fn required_fields(&self) -> Vec<&str>;

    fn transform(&self, record: Record) -> Result<Record, StageError>;
}

/// Terminal stage that turns a record into a typed model.
pub trait ModelStage<M>: Send + Sync {
    fn id(&self) -> &'static str;

    fn to_model(&self, record: Record) -> Result<M, StageError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageError {
    MissingField { stage: String, field: String },
    InvalidValue { field: String, reason: String },
    Model { model: String, reason: String },
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::MissingField { stage, field } => {
                write!(f, "STAGE/MISSING: {} requires field `{}`", stage, field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "STAGE/VALUE: `{}`: {}", field, reason)
            }
            Self::Model { model, reason } => write!(f, "STAGE/MODEL: {}: {}", model, reason),
        }
    }
}

impl std::error::Error for StageError {}
