//! Domain error types
//!
//! This module defines the error hierarchy for Vigil.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Vigil error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VigilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Extract source errors
    #[error("Extract source error: {0}")]
    Source(#[from] SourceError),

    /// Output store errors
    #[error("Output store error: {0}")]
    Output(#[from] OutputError),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Extract source errors
///
/// Errors raised while fetching one of the input files. These never abort a
/// run: the coordinator logs them and continues with an empty dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested file does not exist at the source
    #[error("Extract not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read
    #[error("Failed to read extract {key}: {message}")]
    ReadFailed { key: String, message: String },

    /// The file is not valid UTF-8
    #[error("Extract {0} is not valid UTF-8")]
    InvalidEncoding(String),

    /// Failed to reach the remote source
    #[error("Failed to connect to extract source: {0}")]
    ConnectionFailed(String),

    /// The remote source answered with a non-success status
    #[error("Extract source returned {status} for {key}")]
    HttpStatus { status: u16, key: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Output store errors
///
/// Errors raised while listing, reading, or writing emitted artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to list previously emitted artifacts
    #[error("Failed to list artifacts under {prefix}: {message}")]
    ListFailed { prefix: String, message: String },

    /// Failed to read an artifact
    #[error("Failed to read artifact {name}: {message}")]
    ReadFailed { name: String, message: String },

    /// Failed to write an artifact
    #[error("Failed to write artifact {name}: {message}")]
    WriteFailed { name: String, message: String },

    /// The artifact could not be parsed
    #[error("Malformed artifact {name}: {message}")]
    Malformed { name: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for VigilError {
    fn from(err: std::io::Error) -> Self {
        VigilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VigilError {
    fn from(err: serde_json::Error) -> Self {
        VigilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VigilError {
    fn from(err: toml::de::Error) -> Self {
        VigilError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vigil_error_display() {
        let err = VigilError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_source_error_conversion() {
        let source_err = SourceError::NotFound("reports.txt".to_string());
        let err: VigilError = source_err.into();
        assert!(matches!(err, VigilError::Source(_)));
        assert!(err.to_string().contains("reports.txt"));
    }

    #[test]
    fn test_http_status_display() {
        let err = SourceError::HttpStatus {
            status: 503,
            key: "reactions.txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Extract source returned 503 for reactions.txt"
        );
    }

    #[test]
    fn test_output_error_conversion() {
        let output_err = OutputError::WriteFailed {
            name: "report_output/a.json".to_string(),
            message: "disk full".to_string(),
        };
        let err: VigilError = output_err.into();
        assert!(matches!(err, VigilError::Output(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: VigilError = io_err.into();
        assert!(matches!(err, VigilError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: VigilError = json_err.into();
        assert!(matches!(err, VigilError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: VigilError = toml_err.into();
        assert!(matches!(err, VigilError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_vigil_error_implements_std_error() {
        let err = VigilError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
