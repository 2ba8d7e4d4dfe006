//! Unified Error Model
use crate::config::ConfigError;
use crate::stage::StageError;
use thiserror::Error;

/// Boxed cause carried by transport-level errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("CONFIG/{0}")]
    Config(#[from] ConfigError),

    #[error("HTTP/{url}: {source}")]
    Http {
        url: String,
        status: Option<u16>,
        #[source]
        source: BoxError,
    },

    #[error("DECODE/{url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("PATH/{0}")]
    JsonPath(String),

    #[error("TEMPLATE/{0}")]
    Template(String),

    #[error("ALIGN/{url}: {detail}")]
    Misaligned { url: String, detail: String },

    #[error("EMPTY/no result from {url}")]
    NoResult { url: String },

    #[error("TRANSFORM/{0}")]
    Transform(#[from] StageError),
}

impl ExtractError {
    /// HTTP status code, when the failure came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
