//! Auth screen
//!
//! Login looks up the user by name and verifies the password hash; sign-up
//! checks the name is free, hashes the password and inserts the row.

use crate::backend::{self, Backend, Select};
use crate::password;
use shared::error::{AppError, AppResult};
use shared::models::{User, UserCreate, UserRecord, tables};

/// Which form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    /// Submit button text
    pub fn action_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Sign In",
            AuthMode::Signup => "Sign Up",
        }
    }

    /// Prompt offering the other mode
    pub fn switch_prompt(self) -> (&'static str, &'static str) {
        match self {
            AuthMode::Login => ("New to Oleum? ", "Sign Up"),
            AuthMode::Signup => ("Already have an account? ", "Log In"),
        }
    }
}

/// Validated submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
}

/// State of the auth form
#[derive(Debug, Clone, Default)]
pub struct AuthScreen {
    pub username: String,
    pub password: String,
    mode: AuthMode,
    submitting: bool,
    error: Option<AppError>,
}

impl AuthScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    /// Switch between login and sign-up; clears the error
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.error = None;
    }

    /// Validate the form and enter `submitting`.
    ///
    /// Returns `None` while a submission is in flight or when the form is
    /// incomplete (the error is set locally).
    pub fn begin_submit(&mut self) -> Option<AuthRequest> {
        if self.submitting {
            return None;
        }
        self.error = None;
        if self.username.is_empty() {
            self.error = Some(AppError::validation("Please enter a username"));
            return None;
        }
        if self.password.is_empty() {
            self.error = Some(AppError::validation("Please enter a password"));
            return None;
        }
        self.submitting = true;
        Some(AuthRequest {
            mode: self.mode,
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Leave `submitting`; on success returns the user for the session
    pub fn finish_submit(&mut self, result: AppResult<User>) -> Option<User> {
        self.submitting = false;
        match result {
            Ok(user) => {
                self.password.clear();
                self.error = None;
                Some(user)
            }
            Err(e) => {
                tracing::warn!(code = %e.code, error = %e, "Authentication failed");
                self.error = Some(e);
                None
            }
        }
    }

    /// Validate, call the backend and apply the result
    pub async fn submit(&mut self, backend: &dyn Backend) -> Option<User> {
        let request = self.begin_submit()?;
        let result = authenticate(backend, &request).await;
        self.finish_submit(result)
    }
}

/// Run a login or sign-up against the backend
pub async fn authenticate(backend: &dyn Backend, request: &AuthRequest) -> AppResult<User> {
    match request.mode {
        AuthMode::Login => login(backend, &request.username, &request.password).await,
        AuthMode::Signup => sign_up(backend, &request.username, &request.password).await,
    }
}

async fn login(backend: &dyn Backend, username: &str, password: &str) -> AppResult<User> {
    let query = Select::from(tables::USERS)
        .columns("id,name,password,created_at")
        .eq("name", username);
    let candidates: Vec<UserRecord> = backend::select_all(backend, &query).await?;
    if candidates.is_empty() {
        return Err(AppError::invalid_credentials());
    }
    if candidates.len() > 1 {
        tracing::warn!(user = %username, rows = candidates.len(), "Duplicate user names");
    }

    // names are not guaranteed unique; the first row whose hash verifies wins
    let entered = password.to_string();
    let matched = tokio::task::spawn_blocking(move || {
        candidates
            .into_iter()
            .find(|record| password::verify_password(&entered, &record.password))
    })
    .await
    .map_err(|e| AppError::transport(e.to_string()))?;
    let Some(record) = matched else {
        return Err(AppError::invalid_credentials());
    };

    tracing::info!(user = %record.name, "Login succeeded");
    Ok(record.into_user())
}

async fn sign_up(backend: &dyn Backend, username: &str, password: &str) -> AppResult<User> {
    let query = Select::from(tables::USERS).columns("id").eq("name", username);
    let existing: Vec<serde_json::Value> = backend::select_all(backend, &query).await?;
    if !existing.is_empty() {
        return Err(AppError::username_taken());
    }

    let raw = password.to_string();
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&raw))
        .await
        .map_err(|e| AppError::transport(e.to_string()))?
        .map_err(|e| AppError::transport(e.to_string()))?;

    let row = UserCreate {
        name: username.to_string(),
        password: hash,
    };
    let record: UserRecord = backend::insert_single(backend, tables::USERS, &row).await?;
    tracing::info!(user = %record.name, "Account created");
    Ok(record.into_user())
}
