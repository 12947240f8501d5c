//! Error system for the Oleum client
//!
//! - [`ErrorCode`]: the closed set of failure kinds
//! - [`AppError`]: code + user-facing message (+ optional details)
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::validation("Please select a destination");
//! assert_eq!(err.code, ErrorCode::ValidationFailure);
//! assert!(err.code.is_local());
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, GENERIC_ERROR_MESSAGE};
