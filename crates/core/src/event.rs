//! Typed event payloads recorded in blocks.
//!
//! Payloads form a closed set of variants behind one tagged enum, so every
//! block body has a canonical serialized form the hasher can rely on.

use crate::user::{User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event recorded by a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Fixed payload of the first block in every chain.
    #[serde(rename = "GENESIS")]
    Genesis,
    /// A user entered the registry.
    #[serde(rename = "USER_REGISTRATION")]
    UserRegistration {
        /// Public fields of the registered user.
        user: RegisteredUser,
    },
}

impl Event {
    /// Canonical encoding used as the hasher's payload input.
    ///
    /// serde_json writes struct and enum fields in declaration order, so
    /// identical values always produce identical bytes.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("serialization should not fail")
    }
}

/// Public user fields mirrored into a registration event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    /// The user's opaque identifier.
    pub id: UserId,
    /// The user's unique username.
    pub username: String,
    /// The user's unique email address.
    pub email: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for RegisteredUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}
