//! Error codes for the Oleum client
//!
//! The taxonomy is closed: every failure a screen can observe falls into
//! exactly one of four codes.
//! - 1: Not found (missing row, credential mismatch)
//! - 2: Conflict (duplicate username)
//! - 3: Transport failure (network / hosted store errors)
//! - 4: Validation failure (local checks, corrupt session data)

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Serialized as a `u16` so it can be logged and persisted compactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    /// Requested record does not exist
    NotFound = 1,
    /// Record collides with an existing one
    Conflict = 2,
    /// Backend could not be reached or rejected the request
    TransportFailure = 3,
    /// Input rejected locally, no backend round-trip made
    ValidationFailure = 4,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Classify an HTTP status returned by the hosted store.
    ///
    /// Success statuses have no error code.
    pub fn from_http_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status {
            StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => ErrorCode::NotFound,
            StatusCode::CONFLICT => ErrorCode::Conflict,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ErrorCode::ValidationFailure
            }
            _ => ErrorCode::TransportFailure,
        })
    }

    /// Whether the failure was decided locally without reaching the backend
    pub const fn is_local(&self) -> bool {
        matches!(self, ErrorCode::ValidationFailure)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown `u16` into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::NotFound),
            2 => Ok(ErrorCode::Conflict),
            3 => Ok(ErrorCode::TransportFailure),
            4 => Ok(ErrorCode::ValidationFailure),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_roundtrip_through_u16() {
        for code in [
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::TransportFailure,
            ErrorCode::ValidationFailure,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(99), Err(InvalidErrorCode(99)));
    }

    #[test]
    fn test_error_code_serde() {
        let json = serde_json::to_string(&ErrorCode::Conflict).unwrap();
        assert_eq!(json, "2");
        let code: ErrorCode = serde_json::from_str("3").unwrap();
        assert_eq!(code, ErrorCode::TransportFailure);
        assert!(serde_json::from_str::<ErrorCode>("42").is_err());
    }

    #[test]
    fn test_from_http_status() {
        assert_eq!(ErrorCode::from_http_status(StatusCode::OK), None);
        assert_eq!(ErrorCode::from_http_status(StatusCode::CREATED), None);
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::CONFLICT),
            Some(ErrorCode::Conflict)
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::NOT_FOUND),
            Some(ErrorCode::NotFound)
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::BAD_REQUEST),
            Some(ErrorCode::ValidationFailure)
        );
        assert_eq!(
            ErrorCode::from_http_status(StatusCode::BAD_GATEWAY),
            Some(ErrorCode::TransportFailure)
        );
    }

    #[test]
    fn test_only_validation_is_local() {
        assert!(ErrorCode::ValidationFailure.is_local());
        assert!(!ErrorCode::TransportFailure.is_local());
        assert!(!ErrorCode::NotFound.is_local());
        assert!(!ErrorCode::Conflict.is_local());
    }
}
