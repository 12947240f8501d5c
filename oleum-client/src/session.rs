//! Session store
//!
//! The logged-in user is kept in a [`SessionContext`] owned by the shell and
//! mirrored to one JSON file under the data directory. A missing or corrupt
//! file means "no session"; it never fails the app.

use shared::models::User;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed namespace of the persisted session
pub const SESSION_NAMESPACE: &str = "oleum_user";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-device storage for the session record
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store under `data_dir`: `{data_dir}/oleum_user.json`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir
                .as_ref()
                .join(format!("{}.json", SESSION_NAMESPACE)),
        }
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a session file is present
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Persist `user`
    pub fn save(&self, user: &User) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, content)?;
        tracing::debug!(user_id = user.id, "Session saved");
        Ok(())
    }

    /// Read the persisted user.
    ///
    /// Unreadable or unparsable data is removed and treated as no session.
    pub fn restore(&self) -> Option<User> {
        if !self.path.exists() {
            return None;
        }
        let parsed = fs::read_to_string(&self.path)
            .map_err(SessionError::from)
            .and_then(|content| serde_json::from_str::<User>(&content).map_err(SessionError::from));
        match parsed {
            Ok(user) => {
                tracing::info!(user = %user.name, "Loaded stored session");
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse stored user, clearing it");
                if let Err(e) = self.clear() {
                    tracing::warn!(error = %e, "Failed to remove corrupt session");
                }
                None
            }
        }
    }

    /// Remove the persisted user (missing is fine)
    pub fn clear(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Session cleared");
        }
        Ok(())
    }
}

/// Session lifecycle: `None → Active(user) → None`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    None,
    Active(User),
}

/// Session owned by the shell
#[derive(Debug, Clone)]
pub struct SessionContext {
    store: SessionStore,
    state: SessionState,
}

impl SessionContext {
    /// Restore from `store`
    pub fn restore(store: SessionStore) -> Self {
        let state = match store.restore() {
            Some(user) => SessionState::Active(user),
            None => SessionState::None,
        };
        Self { store, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Active(user) => Some(user),
            SessionState::None => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Activate the session and persist it.
    ///
    /// The in-memory session is active even when persisting fails.
    pub fn establish(&mut self, user: User) -> Result<(), SessionError> {
        let res = self.store.save(&user);
        tracing::info!(user = %user.name, "Session established");
        self.state = SessionState::Active(user);
        res
    }

    /// End the session and remove the persisted copy
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::None;
        tracing::info!("Signed out");
        self.store.clear()
    }
}
