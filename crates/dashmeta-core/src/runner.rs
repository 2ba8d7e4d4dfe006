//! Chained Transformer: runs stages in order, checking each stage's inputs
use crate::data_model::Record;
use crate::stage::{ModelStage, StageError, Transformer};
use std::time::Instant;

pub struct ChainedTransformer<M> {
    stages: Vec<Box<dyn Transformer>>,
    mapper: Box<dyn ModelStage<M>>,
    pipeline_id: String,
}

impl<M> ChainedTransformer<M> {
    pub fn new(stages: Vec<Box<dyn Transformer>>, mapper: Box<dyn ModelStage<M>>) -> Self {
        let pipeline_id = stages
            .iter()
            .map(|s| s.id())
            .chain(std::iter::once(mapper.id()))
            .map(|id| id.rsplit('.').next().unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self {
            stages,
            mapper,
            pipeline_id,
        }
    }

    pub fn transform(&self, record: Record) -> Result<M, StageError> {
        let mut current = record;

        for stage in &self.stages {
            for field in stage.required_fields() {
                if !current.contains_key(field) {
                    return Err(StageError::MissingField {
                        stage: stage.id().to_string(),
                        field: field.to_string(),
                    });
                }
            }

            let start = Instant::now();
            current = stage.transform(current)?;
            tracing::trace!(
                stage = stage.id(),
                latency_us = start.elapsed().as_micros() as u64,
                "stage complete"
            );
        }

        self.mapper.to_model(current)
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn len(&self) -> usize {
        self.stages.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
