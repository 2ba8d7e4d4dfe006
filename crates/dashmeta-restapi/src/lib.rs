//! Dashmeta REST API: chained queries joined into flat records
//!
//! A query chain starts from a [`RestApiQuerySeed`]. Each [`RestApiQuery`]
//! pulls records from the step before it. For every upstream record it fills
//! its URL template, issues one GET, and projects the JSON response into new
//! fields through a [`JsonPath`]. The emitted records keep every upstream
//! field, so join keys flow unchanged to the end of the chain.
//!
//! ```text
//! Seed ─→ RestApiQuery ─→ RestApiQuery ─→ ... ─→ RestApiExtractor ─→ Record
//!          GET + path       GET + path                + static fields
//! ```

pub mod client;
pub mod extractor;
pub mod json_path;
pub mod query;
pub mod template;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use client::{BasicAuth, HttpClient, ReqwestClient};
pub use extractor::{RestApiExtractor, RestApiExtractorConfig};
pub use json_path::JsonPath;
pub use query::{Query, RestApiQuery, RestApiQuerySeed};
pub use template::UrlTemplate;
