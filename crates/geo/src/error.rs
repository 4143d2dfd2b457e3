//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Coordinate text that could not be parsed
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Coordinate outside the WGS84 ranges
    #[error("Coordinate out of range: latitude {latitude}, longitude {longitude}")]
    OutOfRange {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
    },

    /// Unknown distance formula name
    #[error("Unknown distance formula: {0}")]
    UnknownFormula(String),
}

/// Error code for integration with tourism-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Coordinate text that could not be parsed
    InvalidCoordinate = 10001,
    /// Coordinate outside the WGS84 ranges
    OutOfRange = 10002,
    /// Unknown distance formula name
    UnknownFormula = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::OutOfRange { .. } => GeoErrorCode::OutOfRange,
            GeoError::UnknownFormula(_) => GeoErrorCode::UnknownFormula,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            GeoError::InvalidCoordinate("x".into()).code() as u32,
            10001
        );
        assert_eq!(
            GeoError::UnknownFormula("flat-earth".into()).code(),
            GeoErrorCode::UnknownFormula
        );
    }
}
