//! Error handling with codes, context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Error codes for programmatic handling
//! - Optional context and recovery suggestions
//! - Serializable error reports for `--json` output

use aerocoord_geo::{GeoError, GeoErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Unknown = 1000,
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,
    InvalidUtf8 = 2003,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    InvalidConfigValue = 3003,

    // Validation errors (6xxx)
    ValidationError = 6000,
    InvalidInput = 6001,
    InvalidUnit = 6002,
    InvalidSchedule = 6003,

    // Coordinate errors (9xxx)
    CoordinateError = 9000,
    UnrecognizedFormat = 9001,
    InvalidCoordinate = 9002,
    NoCoordinates = 9003,
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
            6 => "Validation",
            9 => "Coordinate",
            _ => "Unknown",
        }
    }

    /// Process exit code for errors of this kind
    pub fn exit_code(&self) -> i32 {
        match self.code() / 1000 {
            3 => exit_codes::CONFIG_ERROR,
            6 => exit_codes::INVALID_INPUT,
            9 => exit_codes::NO_COORDINATES,
            _ => exit_codes::FAILURE,
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
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
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
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
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
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create an .aerocoord.toml file or use --config to specify a path")
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn no_coordinates() -> Self {
        Self::new(ErrorCode::NoCoordinates, "No valid coordinates found in input").with_suggestion(
            "Coordinates must look like DDMMSS[NS]DDDMMSS[EW] or DDMM[NS]DDDMM[EW]",
        )
    }
}

/// Serializable error report for logging and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    /// Input held nothing usable
    pub const NO_COORDINATES: i32 = 2;
    /// Malformed arguments or input values
    pub const INVALID_INPUT: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            std::io::ErrorKind::InvalidData => ErrorCode::InvalidUtf8,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON serialization error: {}", err))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        let code = match err.code() {
            GeoErrorCode::UnrecognizedFormat => ErrorCode::UnrecognizedFormat,
            GeoErrorCode::InvalidCoordinate => ErrorCode::InvalidCoordinate,
            GeoErrorCode::Unformattable => ErrorCode::CoordinateError,
            GeoErrorCode::InvalidSchedule => ErrorCode::InvalidSchedule,
            GeoErrorCode::InvalidUnit => ErrorCode::InvalidUnit,
        };
        let error = Error::new(code, err.to_string());
        let error = match code {
            ErrorCode::InvalidUnit => error.with_suggestion("Use one of KM, NM, MT (or M), FT"),
            ErrorCode::UnrecognizedFormat => error
                .with_suggestion("Use DDMMSS[NS]DDDMMSS[EW] or DDMM[NS]DDDMM[EW], without separators"),
            _ => error,
        };
        error.with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::NoCoordinates.to_string(), "E9003");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::ConfigParseError.category(), "Configuration");
        assert_eq!(ErrorCode::InvalidCoordinate.category(), "Coordinate");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCode::ConfigParseError.exit_code(), exit_codes::CONFIG_ERROR);
        assert_eq!(ErrorCode::InvalidUnit.exit_code(), exit_codes::INVALID_INPUT);
        assert_eq!(ErrorCode::NoCoordinates.exit_code(), exit_codes::NO_COORDINATES);
        assert_eq!(ErrorCode::FileNotFound.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::file_not_found("/path/to/notam.txt").with_context("While reading input");

        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_from_geo_error() {
        let err: Error = GeoError::InvalidUnit("MI".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidUnit);
        assert!(err.suggestion.unwrap().contains("NM"));

        let err: Error = GeoError::UnrecognizedFormat("12N".into()).into();
        assert_eq!(err.code, ErrorCode::UnrecognizedFormat);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_result_ext_converts_foreign_errors() {
        let result: std::result::Result<(), GeoError> = Err(GeoError::InvalidSchedule("x".into()));
        let err = result.context("While formatting schedule").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSchedule);
        assert_eq!(err.context.as_deref(), Some("While formatting schedule"));
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::no_coordinates().with_context("stdin");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E9003"));
        assert!(json.contains("Coordinate"));
        assert!(json.contains("NO_COORDINATES"));
    }
}
