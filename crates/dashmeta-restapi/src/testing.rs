//! In-memory [`HttpClient`] for tests: canned responses keyed by full URL.
use crate::client::{BasicAuth, HttpClient};
use dashmeta_core::ExtractError;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Canned {
    Json(Value),
    Status(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub auth: Option<BasicAuth>,
}

/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct StaticClient {
    responses: HashMap<String, Canned>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StaticClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), Canned::Json(body));
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Canned::Status(status));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl HttpClient for StaticClient {
    fn get_json(&self, url: &str, auth: Option<&BasicAuth>) -> Result<Value, ExtractError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                url: url.to_string(),
                auth: auth.cloned(),
            });

        let status = match self.responses.get(url) {
            Some(Canned::Json(body)) => return Ok(body.clone()),
            Some(Canned::Status(status)) => *status,
            None => 404,
        };
        Err(ExtractError::Http {
            url: url.to_string(),
            status: Some(status),
            source: format!("unexpected status {}", status).into(),
        })
    }
}
