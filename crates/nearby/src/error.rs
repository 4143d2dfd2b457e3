//! Error types for nearby queries.

use std::time::Duration;
use thiserror::Error;
use tourism_places::{ParseCategoryError, StoreError};

/// Result type alias for nearby queries.
pub type Result<T> = std::result::Result<T, NearbyError>;

/// Errors a nearby query can surface.
///
/// A missing source or missing coordinates are not errors: they produce an
/// empty result.
#[derive(Debug, Error)]
pub enum NearbyError {
    /// A request parameter is out of range or malformed
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the request
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A category name matches no collection
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// The store failed to answer; never masked as an empty result
    #[error("Place store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The query did not finish in time
    #[error("Nearby query timed out after {0:?}")]
    Timeout(Duration),
}

/// Error code for integration with tourism-core error handling.
/// Range: 12xxx for nearby errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbyErrorCode {
    /// A request parameter is out of range or malformed
    InvalidParameter = 12001,
    /// A category name matches no collection
    UnknownCategory = 12002,
    /// The store failed to answer
    StoreUnavailable = 12003,
    /// The query did not finish in time
    Timeout = 12004,
}

impl NearbyError {
    /// Returns the error code for this error.
    pub fn code(&self) -> NearbyErrorCode {
        match self {
            NearbyError::InvalidParameter { .. } => NearbyErrorCode::InvalidParameter,
            NearbyError::UnknownCategory(_) => NearbyErrorCode::UnknownCategory,
            NearbyError::StoreUnavailable(_) => NearbyErrorCode::StoreUnavailable,
            NearbyError::Timeout(_) => NearbyErrorCode::Timeout,
        }
    }

    /// True when the caller sent a bad request (4xx); false for server-side failures (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            NearbyError::InvalidParameter { .. } | NearbyError::UnknownCategory(_)
        )
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        NearbyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<ParseCategoryError> for NearbyError {
    fn from(err: ParseCategoryError) -> Self {
        NearbyError::UnknownCategory(err.0)
    }
}

impl From<NearbyError> for tourism_core::Error {
    fn from(err: NearbyError) -> Self {
        use tourism_core::{Error, ErrorCode};

        let error = match &err {
            NearbyError::UnknownCategory(name) => Error::unknown_category(name),
            NearbyError::InvalidParameter { .. } => {
                Error::new(ErrorCode::InvalidInput, err.to_string())
            }
            NearbyError::StoreUnavailable(_) => {
                Error::new(ErrorCode::StoreUnavailable, err.to_string())
                    .with_suggestion("Check that the place store is reachable and retry")
            }
            NearbyError::Timeout(_) => Error::new(ErrorCode::Timeout, err.to_string()),
        };
        error.with_source(err)
    }
}
