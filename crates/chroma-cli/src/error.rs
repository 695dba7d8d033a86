//! Error handling for the chroma CLI.
//!
//! `CliError` is the top-level type every command returns. Domain errors
//! convert into it via `#[from]`, and `main` turns it into a miette report
//! (see [`cli_error_to_miette`]).
//!
//! Messages carry a trailing `Hint:` where there is something concrete the
//! user can do about the failure.

mod miette;

pub use self::miette::cli_error_to_miette;

use chroma_core::AnalyzeError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The analysis itself failed
    #[error("Analysis failed: {0}")]
    Analyze(#[from] AnalyzeError),

    /// I/O errors (writing reports, binding sockets)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a chroma.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// The merged configuration could not be deserialized
    #[error("Invalid configuration: {0}\n\nHint: Check chroma.config.json syntax and CHROMA_* environment variables")]
    Extract(String),

    /// The analyzer section failed validation
    #[error("Invalid analyzer settings: {0}")]
    Analyzer(#[from] chroma_core::ConfigError),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_core::SessionError;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("chroma.config.json"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("chroma.config.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "browser.loadTimeoutMs".to_string(),
            value: "0".to_string(),
            hint: "Use a positive number of milliseconds".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'browser.loadTimeoutMs'"));
        assert!(msg.contains("positive number"));
    }

    #[test]
    fn test_cli_error_from_analyzer_config_error() {
        let err: CliError =
            ConfigError::from(chroma_core::ConfigError::ZeroThreshold("maxChildren")).into();
        assert!(matches!(err, CliError::Config(ConfigError::Analyzer(_))));
        assert!(err.to_string().contains("maxChildren"));
    }

    #[test]
    fn test_cli_error_from_analyze_error() {
        let err: CliError =
            AnalyzeError::from(SessionError::Acquisition("no chrome".to_string())).into();
        assert!(matches!(err, CliError::Analyze(_)));
        assert!(err.to_string().contains("no chrome"));
    }
}
