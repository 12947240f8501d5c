//! User Model

use serde::{Deserialize, Serialize};

/// Primary key of the `users` table
pub type UserId = i64;

/// Session record for the logged-in user.
///
/// This is what gets persisted on the device; it never carries the
/// password column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Full `users` row as read during login
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    /// Argon2 PHC string
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UserRecord {
    /// Drop the credential column, keeping the session shape
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
        }
    }
}

/// Insert payload for sign-up
#[derive(Debug, Clone, Serialize)]
pub struct UserCreate {
    pub name: String,
    /// Argon2 PHC string, never the raw password
    pub password: String,
}
