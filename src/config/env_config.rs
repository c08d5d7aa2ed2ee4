use crate::config::{default_search_url, default_token_url, ApiConfig, AppConfig, DatasetConfig};
use crate::utils::error::{FinderError, Result};
use std::env;

pub const API_KEY_VAR: &str = "AMADEUS_API_KEY";
pub const API_SECRET_VAR: &str = "AMADEUS_API_SECRET";
pub const TOKEN_URL_VAR: &str = "FLIGHT_TOKEN_API";
pub const SEARCH_URL_VAR: &str = "FLIGHT_SEARCH_API";
pub const TIMEOUT_VAR: &str = "FLIGHT_API_TIMEOUT_SECONDS";
pub const AIRPORTS_FILE_VAR: &str = "AIRPORTS_DATA_PATH";

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| FinderError::MissingConfigError {
                field: name.to_string(),
            })
        };

        let timeout_seconds = match lookup(TIMEOUT_VAR) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                FinderError::InvalidConfigValueError {
                    field: TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            api: ApiConfig {
                api_key: required(API_KEY_VAR)?,
                api_secret: required(API_SECRET_VAR)?,
                token_url: lookup(TOKEN_URL_VAR).unwrap_or_else(default_token_url),
                search_url: lookup(SEARCH_URL_VAR).unwrap_or_else(default_search_url),
                timeout_seconds,
            },
            dataset: DatasetConfig {
                airports_file: lookup(AIRPORTS_FILE_VAR),
            },
        })
    }
}
