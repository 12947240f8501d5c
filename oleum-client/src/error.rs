//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Error raised by the backend layer
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The hosted store answered with an error status
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Row count did not match the query's expectation
    #[error("Expected {expected} row(s) from {table}, got {found}")]
    UnexpectedRows {
        table: String,
        expected: &'static str,
        found: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Closed error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Api { status, .. } => http::StatusCode::from_u16(*status)
                .ok()
                .and_then(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::TransportFailure),
            _ => ErrorCode::TransportFailure,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            ClientError::Api { code, details, .. } => {
                let app = match code {
                    Some(code) => app.with_detail("code", code),
                    None => app,
                };
                match details {
                    Some(details) => app.with_detail("details", details),
                    None => app,
                }
            }
            _ => app,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
