//! Application error type

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Fallback text shown when an error carries no message
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Application error with a closed error code and a user-facing message
///
/// Screens convert every failure into this type and keep it as local UI
/// state; nothing is propagated up to the shell.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the kind of failure
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional structured context (backend error code, details text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Message suitable for display, never empty
    pub fn display_message(&self) -> &str {
        if self.message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE
        } else {
            &self.message
        }
    }

    // ==================== Convenience constructors ====================

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, msg)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Conflict, msg)
    }

    /// Create a transport failure
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TransportFailure, msg)
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailure, msg)
    }

    /// Credential mismatch on login
    pub fn invalid_credentials() -> Self {
        Self::not_found("Invalid username or password")
    }

    /// Duplicate username on sign-up
    pub fn username_taken() -> Self {
        Self::conflict("Username already taken")
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
