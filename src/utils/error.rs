use std::fmt;
use thiserror::Error;

/// Which end of the trip a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Origin,
    Destination,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Origin => f.write_str("origin"),
            Leg::Destination => f.write_str("destination"),
        }
    }
}

/// Why a city/country pair did not resolve to any airport.
///
/// Resolution failures are reported to the caller as data; the resolver never
/// retries and never panics on them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    #[error("invalid country name provided: {country}")]
    InvalidCountry { country: String },

    #[error("error while loading airport data: {reason}")]
    DatasetLoadError { reason: String },

    #[error("no airports found for {city}, {country}")]
    NoMatch { city: String, country: String },
}

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Could not resolve {leg} airport: {failure}")]
    Resolution {
        leg: Leg,
        failure: ResolutionFailure,
    },

    #[error("No airport with an IATA code in {city} ({leg})")]
    NoIataCode { leg: Leg, city: String },

    #[error("Token acquisition failed: {reason}")]
    TokenAcquisitionFailed { reason: String },

    #[error("Flight search rejected with status {status}: {detail}")]
    SearchRejected { status: u16, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Resolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::ApiError(_)
            | FinderError::TokenAcquisitionFailed { .. }
            | FinderError::SearchRejected { .. } => ErrorCategory::Network,
            FinderError::CsvError(_)
            | FinderError::IoError(_)
            | FinderError::SerializationError(_) => ErrorCategory::Data,
            FinderError::ConfigError { .. }
            | FinderError::MissingConfigError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            FinderError::Resolution { .. } | FinderError::NoIataCode { .. } => {
                ErrorCategory::Resolution
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // transient on the remote side, worth running again
            FinderError::ApiError(_) => ErrorSeverity::Medium,
            FinderError::SearchRejected { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            FinderError::SearchRejected { .. }
            | FinderError::Resolution { .. }
            | FinderError::NoIataCode { .. }
            | FinderError::CsvError(_)
            | FinderError::SerializationError(_) => ErrorSeverity::High,
            FinderError::TokenAcquisitionFailed { .. }
            | FinderError::IoError(_)
            | FinderError::ConfigError { .. }
            | FinderError::MissingConfigError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FinderError::ApiError(_) => {
                "Check network connectivity and the configured endpoints, then retry".to_string()
            }
            FinderError::TokenAcquisitionFailed { .. } => {
                "Verify AMADEUS_API_KEY, AMADEUS_API_SECRET and FLIGHT_TOKEN_API".to_string()
            }
            FinderError::SearchRejected { status, .. } if *status >= 500 => {
                "The flight search service is unavailable, try again later".to_string()
            }
            FinderError::SearchRejected { .. } => {
                "Check dates, airline codes and the other search options".to_string()
            }
            FinderError::Resolution { failure, .. } => match failure {
                ResolutionFailure::InvalidCountry { .. } => {
                    "Use the ISO 3166 country name, e.g. \"United States\" or \"Korea, Republic of\""
                        .to_string()
                }
                ResolutionFailure::DatasetLoadError { .. } => {
                    "Check the airports file path and that it has the airportsdata CSV header"
                        .to_string()
                }
                ResolutionFailure::NoMatch { .. } => {
                    "Check the city spelling or try the nearest city with an airport".to_string()
                }
            },
            FinderError::NoIataCode { .. } => {
                "Pick a nearby city served by a commercial airport".to_string()
            }
            FinderError::CsvError(_) | FinderError::IoError(_) => {
                "Check that the data file exists and is readable".to_string()
            }
            FinderError::SerializationError(_) => {
                "The API returned an unexpected payload; rerun with --verbose".to_string()
            }
            FinderError::ConfigError { .. }
            | FinderError::MissingConfigError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::ConfigValidationError { .. } => {
                "Fix the configuration file or environment variables".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::Resolution { leg, failure } => {
                format!("Could not find the {} airport: {}", leg, failure)
            }
            FinderError::TokenAcquisitionFailed { .. } => {
                "Could not authenticate with the flight search API".to_string()
            }
            FinderError::SearchRejected { detail, .. } => {
                format!("The flight search was rejected: {}", detail)
            }
            FinderError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_error_message_names_leg() {
        let err = FinderError::Resolution {
            leg: Leg::Destination,
            failure: ResolutionFailure::NoMatch {
                city: "Atlantis".to_string(),
                country: "Australia".to_string(),
            },
        };

        assert_eq!(
            err.to_string(),
            "Could not resolve destination airport: no airports found for Atlantis, Australia"
        );
        assert_eq!(err.category(), ErrorCategory::Resolution);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_search_rejected_severity_depends_on_status() {
        let server_side = FinderError::SearchRejected {
            status: 503,
            detail: "unavailable".to_string(),
        };
        let client_side = FinderError::SearchRejected {
            status: 400,
            detail: "INVALID FORMAT".to_string(),
        };

        assert_eq!(server_side.severity(), ErrorSeverity::Medium);
        assert_eq!(client_side.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_token_failure_is_critical() {
        let err = FinderError::TokenAcquisitionFailed {
            reason: "401 Unauthorized".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("AMADEUS_API_KEY"));
    }
}
