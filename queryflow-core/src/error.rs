//! Error types for the QueryFlow demo core.
//!
//! Uses `thiserror` for public API error types with structured variants
//! covering the SDK client binding and configuration domains.

use std::path::PathBuf;

/// Top-level error type for the QueryFlow core library.
#[derive(Debug, thiserror::Error)]
pub enum QueryFlowError {
    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the QueryFlow client binding.
///
/// The paid query is a single attempt; every variant here is terminal for
/// that attempt and surfaces to the user as one failure message.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("API request failed: {message}")]
    ApiRequest { message: String },

    #[error("API response parse error: {message}")]
    ResponseParse { message: String },

    #[error("Payment credential rejected by the service")]
    AuthFailed,

    #[error("Payment declined: {message}")]
    PaymentDeclined { message: String },

    #[error("Rate limited by the service, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Service connection failed: {message}")]
    Connection { message: String },

    #[error("Query succeeded but no settlement receipt was returned")]
    MissingReceipt,
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Environment variable not set: {var}")]
    EnvVarMissing { var: String },

    #[error("Configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `QueryFlowError`.
pub type Result<T> = std::result::Result<T, QueryFlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_sdk() {
        let err = QueryFlowError::Sdk(SdkError::ApiRequest {
            message: "connection refused".into(),
        });
        assert_eq!(
            err.to_string(),
            "SDK error: API request failed: connection refused"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = QueryFlowError::Config(ConfigError::EnvVarMissing {
            var: "PRIVATE_KEY".into(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Environment variable not set: PRIVATE_KEY"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: QueryFlowError = io_err.into();
        assert!(matches!(err, QueryFlowError::Io(_)));
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: QueryFlowError = serde_err.into();
        assert!(matches!(err, QueryFlowError::Serialization(_)));
    }

    #[test]
    fn test_sdk_error_variants() {
        let err = SdkError::PaymentDeclined {
            message: "insufficient AVAX balance".into(),
        };
        assert_eq!(
            err.to_string(),
            "Payment declined: insufficient AVAX balance"
        );

        let err = SdkError::RateLimited {
            retry_after_secs: 60,
        };
        assert_eq!(
            err.to_string(),
            "Rate limited by the service, retry after 60s"
        );

        let err = SdkError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }

    #[test]
    fn test_config_error_file_not_found() {
        let err = ConfigError::FileNotFound {
            path: PathBuf::from("/tmp/queryflow.toml"),
        };
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /tmp/queryflow.toml"
        );
    }
}
