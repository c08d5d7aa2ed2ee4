#[cfg(feature = "cli")]
pub mod cli;
pub mod env_config;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_range, validate_secret, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TOKEN_URL: &str = "https://test.api.amadeus.com/v1/security/oauth2/token";
pub const DEFAULT_SEARCH_URL: &str = "https://test.api.amadeus.com/v2/shopping/flight-offers";

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

/// Credentials and endpoints for the flight-offers API.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            token_url: default_token_url(),
            search_url: default_search_url(),
            timeout_seconds: None,
        }
    }

    pub fn with_endpoints(
        mut self,
        token_url: impl Into<String>,
        search_url: impl Into<String>,
    ) -> Self {
        self.token_url = token_url.into();
        self.search_url = search_url.into();
        self
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("token_url", &self.token_url)
            .field("search_url", &self.search_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_secret("api.api_key", &self.api_key)?;
        validate_secret("api.api_secret", &self.api_secret)?;
        validate_url("api.token_url", &self.token_url)?;
        validate_url("api.search_url", &self.search_url)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub airports_file: Option<String>,
}

impl Validate for DatasetConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.airports_file {
            validate_path("dataset.airports_file", path)?;
            validate_file_extension("dataset.airports_file", path, &["csv"])?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.dataset.validate()?;
        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FinderError;

    #[test]
    fn test_debug_redacts_secret() {
        let config = ApiConfig::new("key-123", "very-secret");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("key-123"));
        assert!(!rendered.contains("very-secret"));
    }

    #[test]
    fn test_validate_defaults() {
        let config = AppConfig {
            api: ApiConfig::new("key", "secret"),
            dataset: DatasetConfig::default(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint_and_timeout() {
        let bad_url =
            ApiConfig::new("key", "secret").with_endpoints("not a url", DEFAULT_SEARCH_URL);
        assert!(matches!(
            bad_url.validate(),
            Err(FinderError::InvalidConfigValueError { .. })
        ));

        let mut bad_timeout = ApiConfig::new("key", "secret");
        bad_timeout.timeout_seconds = Some(0);
        assert!(bad_timeout.validate().is_err());
    }

    #[test]
    fn test_validate_airports_file_extension() {
        let dataset = DatasetConfig {
            airports_file: Some("airports.json".to_string()),
        };
        assert!(dataset.validate().is_err());
    }
}
