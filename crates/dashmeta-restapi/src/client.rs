//! HTTP transport for query steps
use dashmeta_core::config::ConfigError;
use dashmeta_core::ExtractError;
use reqwest::header::ACCEPT;
use serde_json::Value;

/// Basic-auth credential pair shared by every step of a query chain.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Blocking JSON GET.
pub trait HttpClient: Send + Sync {
    fn get_json(&self, url: &str, auth: Option<&BasicAuth>) -> Result<Value, ExtractError>;
}

/// [`HttpClient`] backed by `reqwest`'s blocking client with its default timeout.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, ExtractError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("dashmeta/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "http_client".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    fn get_json(&self, url: &str, auth: Option<&BasicAuth>) -> Result<Value, ExtractError> {
        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(auth) = auth {
            request = request.basic_auth(&auth.username, Some(auth.password()));
        }

        let response = request.send().map_err(|e| ExtractError::Http {
            url: url.to_string(),
            status: e.status().map(|s| s.as_u16()),
            source: Box::new(e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Http {
                url: url.to_string(),
                status: Some(status.as_u16()),
                source: format!("unexpected status {}", status).into(),
            });
        }

        response.json::<Value>().map_err(|e| ExtractError::Decode {
            url: url.to_string(),
            source: Box::new(e),
        })
    }
}
