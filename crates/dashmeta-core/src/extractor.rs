//! Extractor Trait: pull-based, one record per call
use crate::error::ExtractError;

pub trait Extractor {
    type Output;

    /// Configuration scope (ex: "extractor.restapi")
    fn scope(&self) -> &'static str;

    /// Next record, or `None` once the source is exhausted.
    fn extract(&mut self) -> Result<Option<Self::Output>, ExtractError>;

    /// Iterate over the remaining records.
    fn records(self) -> Records<Self>
    where
        Self: Sized,
    {
        Records { extractor: self }
    }
}

/// Iterator adapter returned by [`Extractor::records`].
pub struct Records<E> {
    extractor: E,
}

impl<E: Extractor> Iterator for Records<E> {
    type Item = Result<E::Output, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.extractor.extract().transpose()
    }
}
