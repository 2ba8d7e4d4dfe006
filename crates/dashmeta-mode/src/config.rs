//! Mode extractor configuration
//!
//! Read from the `extractor.mode_dashboard_execution` scope of a job config.
//! Nested `extractor.restapi` and `transformer.timestamp_str_to_epoch`
//! subtrees configure the inner components; their values win over the
//! fallbacks this extractor supplies.

use dashmeta_core::config::{from_scoped_yaml, require, ConfigError};
use dashmeta_restapi::{BasicAuth, RestApiExtractorConfig};
use dashmeta_transform::TimestampToEpochConfig;
use serde::{Deserialize, Serialize};

pub const SCOPE: &str = "extractor.mode_dashboard_execution";
pub const DEFAULT_BASE_URL: &str = "https://app.mode.com";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDashboardConfig {
    #[serde(default)]
    pub organization: String,
    /// Basic-auth user half of the Mode API token
    #[serde(default)]
    pub mode_user_token: String,
    /// Basic-auth password half of the Mode API token
    #[serde(default)]
    pub mode_password_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub extractor: ExtractorScopes,
    #[serde(default)]
    pub transformer: TransformerScopes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractorScopes {
    #[serde(default)]
    pub restapi: RestApiExtractorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformerScopes {
    #[serde(default)]
    pub timestamp_str_to_epoch: TimestampToEpochConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ModeDashboardConfig {
    fn default() -> Self {
        Self {
            organization: String::new(),
            mode_user_token: String::new(),
            mode_password_token: String::new(),
            base_url: default_base_url(),
            extractor: ExtractorScopes::default(),
            transformer: TransformerScopes::default(),
        }
    }
}

impl std::fmt::Debug for ModeDashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ModeDashboardConfig")
            .field("organization", &self.organization)
            .field("mode_user_token", &self.mode_user_token)
            .field("mode_password_token", &"***")
            .field("base_url", &self.base_url)
            .field("extractor", &self.extractor)
            .field("transformer", &self.transformer)
            .finish()
    }
}

impl ModeDashboardConfig {
    pub fn new(
        organization: impl Into<String>,
        mode_user_token: impl Into<String>,
        mode_password_token: impl Into<String>,
    ) -> Self {
        Self {
            organization: organization.into(),
            mode_user_token: mode_user_token.into(),
            mode_password_token: mode_password_token.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load the extractor's own subtree.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a whole job config, under [`SCOPE`].
    pub fn from_job_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = from_scoped_yaml(yaml, SCOPE)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require("organization", &self.organization)?;
        require("mode_user_token", &self.mode_user_token)?;
        require("mode_password_token", &self.mode_password_token)?;

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                key: "base_url".to_string(),
                reason: format!("`{}` is not an http(s) URL", self.base_url),
            });
        }
        Ok(())
    }

    pub fn auth(&self) -> BasicAuth {
        BasicAuth::new(&self.mode_user_token, &self.mode_password_token)
    }

    /// Base URL without a trailing `/`.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_yaml_defaults() {
        let config = ModeDashboardConfig::from_yaml(
            "organization: acme\nmode_user_token: user\nmode_password_token: pass\n",
        )
        .unwrap();

        assert_eq!(config.organization, "acme");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.extractor.restapi.static_record.is_empty());
        assert_eq!(config.transformer.timestamp_str_to_epoch.field_name, None);
    }

    #[test]
    fn test_from_job_yaml_reads_nested_scopes() {
        let yaml = r#"
extractor:
  mode_dashboard_execution:
    organization: acme
    mode_user_token: user
    mode_password_token: pass
    base_url: http://localhost:8080/
    extractor:
      restapi:
        static_record:
          cluster: prod
    transformer:
      timestamp_str_to_epoch:
        timestamp_format: "%Y-%m-%d %H:%M:%S"
"#;
        let config = ModeDashboardConfig::from_job_yaml(yaml).unwrap();

        assert_eq!(config.api_root(), "http://localhost:8080");
        assert_eq!(config.extractor.restapi.static_record["cluster"], json!("prod"));
        assert_eq!(
            config.transformer.timestamp_str_to_epoch.timestamp_format,
            "%Y-%m-%d %H:%M:%S"
        );
    }

    #[test]
    fn test_missing_required_keys() {
        let err = ModeDashboardConfig::from_yaml("mode_user_token: u\nmode_password_token: p\n")
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("organization".to_string()));

        let err = ModeDashboardConfig::from_yaml("organization: acme\nmode_user_token: u\n")
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("mode_password_token".to_string()));

        let err = ModeDashboardConfig::new("acme", "", "p").validate().unwrap_err();
        assert_eq!(err, ConfigError::Missing("mode_user_token".to_string()));
    }

    #[test]
    fn test_job_yaml_without_scope_is_missing_organization() {
        let err = ModeDashboardConfig::from_job_yaml("extractor:\n  other: {}\n").unwrap_err();
        assert_eq!(err, ConfigError::Missing("organization".to_string()));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ModeDashboardConfig::new("acme", "u", "p")
            .with_base_url("app.mode.com")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "base_url"));
    }

    #[test]
    fn test_debug_hides_password() {
        let shown = format!("{:?}", ModeDashboardConfig::new("acme", "user", "hunter2"));
        assert!(shown.contains("acme"));
        assert!(!shown.contains("hunter2"));
    }
}
