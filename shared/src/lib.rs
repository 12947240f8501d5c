//! Shared types for Oleum
//!
//! Row models of the hosted store and the client's error taxonomy, used by
//! both the client library and the terminal front-end.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
