//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during coordinate processing.
///
/// None of these abort a pipeline run: the extractor and the facade turn
/// them into invalid candidates, `None` values and warnings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A token matches neither canonical shape
    #[error("Unrecognized coordinate format: {0}")]
    UnrecognizedFormat(String),

    /// Decimal value outside latitude/longitude ranges
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A regex match could not be assembled into a canonical token
    #[error("Coordinate formatting error for '{raw}': {reason}")]
    Unformattable {
        /// Concatenated captured text
        raw: String,
        /// What went wrong
        reason: String,
    },

    /// Malformed NOTAM schedule range
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Unknown distance unit
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),
}

/// Error code for integration with aerocoord-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Unrecognized coordinate format
    UnrecognizedFormat = 10001,
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
    /// Formatting failure during extraction
    Unformattable = 10003,
    /// Invalid schedule range
    InvalidSchedule = 10004,
    /// Invalid unit
    InvalidUnit = 10005,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::UnrecognizedFormat(_) => GeoErrorCode::UnrecognizedFormat,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::Unformattable { .. } => GeoErrorCode::Unformattable,
            GeoError::InvalidSchedule(_) => GeoErrorCode::InvalidSchedule,
            GeoError::InvalidUnit(_) => GeoErrorCode::InvalidUnit,
        }
    }
}
