//! # User model
//!
//! [`User`] is the account record the backend returns from login,
//! registration and `GET /auth/current/`. The client only caches it for
//! display; the backend owns it.
//!
//! All string fields default to empty so that a partial payload (the backend
//! omits names the user never filled in) still deserialises.

use serde::{Deserialize, Serialize};

/// Account information returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// Get display name, falling back to "User" if the username is empty.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            "User"
        } else {
            &self.username
        }
    }

    /// Upper-cased first letter of the display name, used for the avatar.
    pub fn initial(&self) -> char {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }

    /// "First Last" when either name is set.
    pub fn full_name(&self) -> Option<String> {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        (!full.is_empty()).then(|| full.to_string())
    }
}
