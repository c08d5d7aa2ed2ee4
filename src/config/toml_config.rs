use crate::config::{AppConfig, DatasetConfig};
use crate::utils::error::{FinderError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// 只讀取 `[dataset]` 區段，`[api]` 可以不存在
#[derive(Deserialize)]
struct DatasetSection {
    #[serde(default)]
    dataset: DatasetConfig,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_toml(content)
    }
}

impl DatasetConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinderError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let section: DatasetSection = parse_toml(content)?;
        Ok(section.dataset)
    }
}

fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T> {
    let processed_content = substitute_env_vars(content)?;

    toml::from_str(&processed_content).map_err(|e| FinderError::ConfigValidationError {
        field: "toml_parsing".to_string(),
        message: format!("TOML parsing error: {}", e),
    })
}

/// 替換環境變數 (例如 ${AMADEUS_API_KEY})；未設定的變數保留原樣，交由驗證階段回報
pub fn substitute_env_vars(content: &str) -> Result<String> {
    substitute_vars(content, |name| std::env::var(name).ok())
}

pub fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::ConfigError {
        message: format!("invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        match lookup(var_name) {
            Some(value) => escape_basic_string(&value),
            None => format!("${{{}}}", var_name),
        }
    });

    Ok(result.to_string())
}

/// 值會被放進 TOML 的雙引號字串內，必須先跳脫
fn escape_basic_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SEARCH_URL;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_known_and_unknown_vars() {
        let content = "key = \"${KNOWN}\"\nsecret = \"${UNKNOWN}\"";
        let result = substitute_vars(content, |name| {
            (name == "KNOWN").then(|| "abc".to_string())
        })
        .unwrap();

        assert_eq!(result, "key = \"abc\"\nsecret = \"${UNKNOWN}\"");
    }

    #[test]
    fn test_substituted_value_with_quotes_and_backslashes() {
        let content = "[api]\napi_key = \"key\"\napi_secret = \"${SECRET}\"\n";
        let substituted = substitute_vars(content, |name| {
            (name == "SECRET").then(|| r#"pa"ss\word"#.to_string())
        })
        .unwrap();

        let config: AppConfig = toml::from_str(&substituted).unwrap();
        assert_eq!(config.api.api_secret, r#"pa"ss\word"#);
    }

    #[test]
    fn test_dataset_section_without_api_table() {
        let dataset = DatasetConfig::from_toml_str(
            r#"
[dataset]
airports_file = "/data/airports.csv"
"#,
        )
        .unwrap();
        assert_eq!(dataset.airports_file.as_deref(), Some("/data/airports.csv"));

        let empty = DatasetConfig::from_toml_str("[api]\napi_key = \"key\"\n").unwrap();
        assert!(empty.airports_file.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::from_toml_str(
            r#"
[api]
api_key = "key"
api_secret = "secret"
token_url = "http://localhost:8080/v1/security/oauth2/token"
search_url = "http://localhost:8080/v2/shopping/flight-offers"
timeout_seconds = 20

[dataset]
airports_file = "data/airports.csv"
"#,
        )
        .unwrap();

        assert_eq!(config.api.api_key, "key");
        assert_eq!(config.api.timeout_seconds, Some(20));
        assert_eq!(config.dataset.airports_file.as_deref(), Some("data/airports.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dataset_table_is_optional() {
        let config = AppConfig::from_toml_str(
            r#"
[api]
api_key = "key"
api_secret = "secret"
"#,
        )
        .unwrap();

        assert_eq!(config.api.search_url, DEFAULT_SEARCH_URL);
        assert!(config.dataset.airports_file.is_none());
    }

    #[test]
    fn test_unresolved_secret_fails_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[api]
api_key = "key"
api_secret = "${FLIGHT_FINDER_TEST_UNSET_SECRET}"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(FinderError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_missing_api_table_is_parse_error() {
        let result = AppConfig::from_toml_str("[dataset]\n");
        assert!(matches!(
            result,
            Err(FinderError::ConfigValidationError { field, .. }) if field == "toml_parsing"
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\napi_key = \"file-key\"\napi_secret = \"file-secret\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.api_key, "file-key");
    }
}
