use crate::scopes;
use dashmeta_core::{FromRecord, ModelStage, Record, StageError};
use std::marker::PhantomData;

/// Maps a record into the model type `M`, chosen at compile time.
pub struct DictToModel<M> {
    _model: PhantomData<fn() -> M>,
}

impl<M> DictToModel<M> {
    pub fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<M> Default for DictToModel<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: FromRecord> ModelStage<M> for DictToModel<M> {
    fn id(&self) -> &'static str {
        scopes::DICT_TO_MODEL
    }

    fn to_model(&self, record: Record) -> Result<M, StageError> {
        M::from_record(record)
    }
}
