//! Execution Context: identity of one configured extractor, attached to its logs
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    pub scope: String,
    pub run_id: String,
}

impl ExtractionContext {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            run_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}
