//! Users and their opaque identifiers.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque user identifier: 16 lowercase hex characters.
///
/// The short-hex surface is kept for wire compatibility, but the value is
/// drawn from OS randomness rather than a hashed clock, so it carries the
/// full 64 bits of entropy the format allows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Identifier length in hex characters.
    pub const LEN: usize = 16;

    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::LEN / 2];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Get as string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user.
///
/// Users are created once and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identifier assigned at creation.
    pub id: UserId,
    /// Unique username (exact-match uniqueness).
    pub username: String,
    /// Unique email address (exact-match uniqueness).
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id and the current time.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}
