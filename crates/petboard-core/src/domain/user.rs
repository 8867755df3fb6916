use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - an account that can post ads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user about to be registered; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Create a new user draft stamped with the current time.
    pub fn new(
        email: String,
        password_hash: String,
        phone: Option<String>,
        name: Option<String>,
    ) -> Self {
        Self {
            email,
            password_hash,
            phone,
            name,
            created_at: Utc::now(),
        }
    }
}
