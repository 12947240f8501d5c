//! Oleum Client - thin client for the Oleum hosted store
//!
//! Table-scoped backend access, the on-device session, and the state
//! models of every screen.

pub mod backend;
pub mod config;
pub mod error;
pub mod password;
pub mod screens;
pub mod session;
pub mod shell;

pub use backend::{Backend, BackendCall, InMemoryBackend, RestBackend, Select};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{SessionContext, SessionError, SessionState, SessionStore};
pub use shell::{Effect, Outcome, Screen, Shell, Tab, Task};

// Re-export shared types for convenience
pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::models::User;
