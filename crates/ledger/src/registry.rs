//! The uniqueness-enforcing user registry.

use crate::chain::{Chain, ChainError};
use thiserror::Error;
use userchain_core::{Event, RegisteredUser, User};

/// Errors that can occur during registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("failed to record registration: {0}")]
    Chain(#[from] ChainError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// In-memory set of users with uniqueness constraints on username and email.
///
/// The registry grows monotonically in registration order; there is no
/// update or removal. Every successful registration appends exactly one
/// `USER_REGISTRATION` block to the chain, so users and registration blocks
/// stay paired 1:1.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Check if no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Register a new user and record it on the chain.
    ///
    /// Uniqueness is exact-match and case-sensitive; the username is checked
    /// before the email, so a request colliding on both reports the username.
    /// The user is stored only after the paired block is appended, so a
    /// failed append leaves no partial state.
    pub fn register(&mut self, chain: &mut Chain, username: &str, email: &str) -> Result<User> {
        if self.users.iter().any(|u| u.username == username) {
            return Err(RegistryError::DuplicateUsername(username.to_string()));
        }

        if self.users.iter().any(|u| u.email == email) {
            return Err(RegistryError::DuplicateEmail(email.to_string()));
        }

        let user = User::new(username, email);
        chain.append(Event::UserRegistration {
            user: RegisteredUser::from(&user),
        })?;
        self.users.push(user.clone());

        Ok(user)
    }

    /// Look up a user by exact username.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Look up a user by id.
    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id.as_str() == id)
    }

    /// All users in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }
}
