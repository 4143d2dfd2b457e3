//! Coded error handling with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Unclassified failure
    Unknown = 1000,
    /// Bug or broken invariant
    Internal = 1001,
    /// Operation exceeded its deadline
    Timeout = 1003,

    // IO errors (2xxx)
    /// Generic I/O failure
    IoError = 2000,
    /// File does not exist
    FileNotFound = 2001,
    /// Insufficient permissions
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    /// Generic configuration failure
    ConfigError = 3000,
    /// Configuration file does not exist
    ConfigNotFound = 3001,
    /// Configuration file could not be parsed
    ConfigParseError = 3002,
    /// Configuration values are inconsistent
    ConfigValidationError = 3003,
    /// Single configuration value is unusable
    InvalidConfigValue = 3004,

    // Data errors (4xxx)
    /// Place documents could not be read
    DataError = 4000,
    /// Place document is malformed
    InvalidDocument = 4001,
    /// Place store could not answer
    StoreUnavailable = 4002,

    // Validation errors (6xxx)
    /// Generic validation failure
    ValidationError = 6000,
    /// Caller supplied an unusable parameter
    InvalidInput = 6001,
    /// Category name is not known
    UnknownCategory = 6002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Data",
            6 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {ctx}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(ToString::to_string),
        }
    }

    /// Exit code a CLI should terminate with for this error
    pub fn exit_code(&self) -> i32 {
        match self.code.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            4 => exit_codes::DATA_ERROR,
            6 => exit_codes::VALIDATION_ERROR,
            _ if self.code == ErrorCode::Timeout => exit_codes::TIMEOUT,
            _ => exit_codes::FAILURE,
        }
    }

    // Convenience constructors

    /// I/O failure
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    /// Missing file
    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    /// Generic configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Missing configuration file
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .places-nearby.toml file or use --config to specify a path")
    }

    /// Inconsistent configuration values
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Place data failure
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataError, message)
    }

    /// Unknown place category
    pub fn unknown_category(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownCategory,
            format!("Unknown category: {name}"),
        )
        .with_suggestion("Use one of: accommodation, attraction, cuisine, entertainment")
    }
}

/// Serializable error report for logging and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code
    pub code: ErrorCode,
    /// Code rendered as `E0000`
    pub code_str: String,
    /// Human-readable category
    pub category: String,
    /// Message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Source error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Generic failure
    pub const FAILURE: i32 = 1;
    /// Invalid input
    pub const VALIDATION_ERROR: i32 = 2;
    /// Invalid configuration
    pub const CONFIG_ERROR: i32 = 3;
    /// Unreadable place data
    pub const DATA_ERROR: i32 = 4;
    /// Deadline exceeded
    pub const TIMEOUT: i32 = 124;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::InvalidDocument, format!("JSON parse error: {err}"))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

impl From<tourism_geo::GeoError> for Error {
    fn from(err: tourism_geo::GeoError) -> Self {
        Error::new(ErrorCode::InvalidInput, err.to_string()).with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error
    ///
    /// # Errors
    ///
    /// Returns the original error with context added.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Attach a recovery suggestion to the error
    ///
    /// # Errors
    ///
    /// Returns the original error with the suggestion added.
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::StoreUnavailable.to_string(), "E4002");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::DataError.category(), "Data");
        assert_eq!(ErrorCode::UnknownCategory.category(), "Validation");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::file_not_found("/path/to/places.json")
            .with_context("While loading place documents");

        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::config_invalid("bad").exit_code(), exit_codes::CONFIG_ERROR);
        assert_eq!(Error::unknown_category("museum").exit_code(), exit_codes::VALIDATION_ERROR);
        assert_eq!(Error::new(ErrorCode::Timeout, "slow").exit_code(), exit_codes::TIMEOUT);
        assert_eq!(Error::data("broken").exit_code(), exit_codes::DATA_ERROR);
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::unknown_category("museum").with_context("Parsing nearby request");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E6002"));
        assert!(json.contains("Validation"));
        assert!(json.contains("museum"));
    }
}
