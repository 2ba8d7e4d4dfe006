//! REST API extractor: drains a query chain and stamps static fields
use crate::query::Query;
use dashmeta_core::{ExtractError, Extractor, Record};
use serde::{Deserialize, Serialize};

pub const SCOPE: &str = "extractor.restapi";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestApiExtractorConfig {
    /// Fields written over every extracted record
    #[serde(default)]
    pub static_record: Record,
}

impl RestApiExtractorConfig {
    /// Fill fields absent from `static_record` with those of `fallback`.
    pub fn with_fallback(mut self, fallback: &Record) -> Self {
        for (k, v) in fallback {
            self.static_record.entry(k.clone()).or_insert_with(|| v.clone());
        }
        self
    }
}

pub struct RestApiExtractor {
    query: Box<dyn Query>,
    static_record: Record,
}

impl RestApiExtractor {
    pub fn new(query: Box<dyn Query>, config: RestApiExtractorConfig) -> Self {
        Self {
            query,
            static_record: config.static_record,
        }
    }
}

impl Extractor for RestApiExtractor {
    type Output = Record;

    fn scope(&self) -> &'static str {
        SCOPE
    }

    fn extract(&mut self) -> Result<Option<Record>, ExtractError> {
        Ok(self.query.next_record()?.map(|mut record| {
            for (k, v) in &self.static_record {
                record.insert(k.clone(), v.clone());
            }
            record
        }))
    }
}
