//! Ledger facade: one shared handle over the chain and the registry.
//!
//! The facade is the context object constructed once at startup and passed
//! by reference to every caller; there is no global instance. One lock
//! guards both halves of the state, so a registration's uniqueness check,
//! user creation, and paired append run as a single critical section while
//! reads share consistent snapshots.

use crate::chain::{Chain, ChainError};
use crate::registry::{RegistryError, UserRegistry};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use userchain_core::{Block, User};

/// Errors surfaced by the ledger facade.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("no user named {0}")]
    UserNotFound(String),

    #[error("no block at index {0}")]
    BlockNotFound(u64),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Snapshot of the ledger's headline numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerInfo {
    /// Number of blocks, genesis included.
    pub total_blocks: usize,
    /// Number of registered users.
    pub total_users: usize,
    /// Result of the full integrity check.
    pub is_valid: bool,
    /// The chain's tail block.
    pub latest_block: Block,
}

/// What a search query ended up matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    User,
    Block,
    Mixed,
}

/// Aggregated matches for a search query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    /// Users matched by exact username or id.
    pub users: Vec<User>,
    /// Blocks matched by numeric index.
    pub blocks: Vec<Block>,
}

impl SearchResults {
    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.blocks.is_empty()
    }

    /// The category of what matched, or `None` when nothing did.
    pub fn kind(&self) -> Option<SearchKind> {
        match (self.users.is_empty(), self.blocks.is_empty()) {
            (false, true) => Some(SearchKind::User),
            (true, false) => Some(SearchKind::Block),
            (false, false) => Some(SearchKind::Mixed),
            (true, true) => None,
        }
    }
}

/// The chain and the user registry behind one set of read/write operations.
#[derive(Debug)]
pub struct Ledger {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    chain: Chain,
    registry: UserRegistry,
}

impl Ledger {
    /// Create a ledger with a fresh genesis chain and an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                chain: Chain::new(),
                registry: UserRegistry::new(),
            }),
        }
    }

    /// Register a user and append the paired registration block.
    ///
    /// Empty fields are rejected before the critical section is entered.
    pub fn register(&self, username: &str, email: &str) -> Result<User> {
        if username.trim().is_empty() {
            return Err(LedgerError::EmptyField("username"));
        }
        if email.trim().is_empty() {
            return Err(LedgerError::EmptyField("email"));
        }

        let mut inner = self.inner.write();
        let Inner { chain, registry } = &mut *inner;

        let user = registry.register(chain, username, email)?;
        let block_index = chain.latest()?.index;

        tracing::info!(
            username = %user.username,
            id = %user.id,
            block = block_index,
            "registered user"
        );

        Ok(user)
    }

    /// Headline numbers plus the latest block.
    pub fn info(&self) -> Result<LedgerInfo> {
        let inner = self.inner.read();
        Ok(LedgerInfo {
            total_blocks: inner.chain.len(),
            total_users: inner.registry.len(),
            is_valid: inner.chain.is_valid(),
            latest_block: inner.chain.latest()?.clone(),
        })
    }

    /// All blocks in chain order.
    pub fn blocks(&self) -> Vec<Block> {
        self.inner.read().chain.blocks().to_vec()
    }

    /// Block at `index`.
    pub fn block(&self, index: u64) -> Result<Block> {
        self.inner
            .read()
            .chain
            .get(index)
            .cloned()
            .ok_or(LedgerError::BlockNotFound(index))
    }

    /// All users in registration order.
    pub fn users(&self) -> Vec<User> {
        self.inner.read().registry.users().to_vec()
    }

    /// User with the exact `username`.
    pub fn user(&self, username: &str) -> Result<User> {
        self.inner
            .read()
            .registry
            .find_by_username(username)
            .cloned()
            .ok_or_else(|| LedgerError::UserNotFound(username.to_string()))
    }

    /// Run the full integrity check over the chain.
    pub fn is_valid(&self) -> bool {
        self.inner.read().chain.is_valid()
    }

    /// Exact-match search across usernames, user ids, and block indices.
    pub fn search(&self, query: &str) -> SearchResults {
        let inner = self.inner.read();
        let mut results = SearchResults::default();

        if let Some(user) = inner.registry.find_by_username(query) {
            results.users.push(user.clone());
        }

        if let Some(user) = inner.registry.find_by_id(query) {
            // The same user can match by name and by id; include it once.
            if results.users.iter().all(|u| u.id != user.id) {
                results.users.push(user.clone());
            }
        }

        if let Ok(index) = query.parse::<u64>() {
            if let Some(block) = inner.chain.get(index) {
                results.blocks.push(block.clone());
            }
        }

        results
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userchain_core::Event;

    #[test]
    fn test_register_and_info() {
        let ledger = Ledger::new();
        let user = ledger.register("alice", "a@x.com").unwrap();

        let info = ledger.info().unwrap();
        assert_eq!(info.total_blocks, 2);
        assert_eq!(info.total_users, 1);
        assert!(info.is_valid);
        assert_eq!(info.latest_block.index, 1);

        match &info.latest_block.payload {
            Event::UserRegistration { user: recorded } => assert_eq!(recorded.id, user.id),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_empty_fields_rejected() {
        let ledger = Ledger::new();

        let err = ledger.register("", "a@x.com").unwrap_err();
        assert!(matches!(err, LedgerError::EmptyField("username")));

        let err = ledger.register("alice", "   ").unwrap_err();
        assert!(matches!(err, LedgerError::EmptyField("email")));

        // Nothing was recorded.
        let info = ledger.info().unwrap();
        assert_eq!(info.total_blocks, 1);
        assert_eq!(info.total_users, 0);
    }

    #[test]
    fn test_duplicate_leaves_no_orphan_block() {
        let ledger = Ledger::new();
        ledger.register("u1", "u1@e.com").unwrap();

        let err = ledger.register("u1", "u2@e.com").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Registry(RegistryError::DuplicateUsername(_))
        ));

        let info = ledger.info().unwrap();
        assert_eq!(info.total_blocks, 2);
        assert_eq!(info.total_users, 1);
        assert!(info.is_valid);
    }

    #[test]
    fn test_block_lookup() {
        let ledger = Ledger::new();
        ledger.register("alice", "a@x.com").unwrap();

        assert_eq!(ledger.block(0).unwrap().index, 0);
        assert_eq!(ledger.block(1).unwrap().index, 1);
        assert!(matches!(
            ledger.block(5).unwrap_err(),
            LedgerError::BlockNotFound(5)
        ));
    }

    #[test]
    fn test_user_lookup() {
        let ledger = Ledger::new();
        ledger.register("alice", "a@x.com").unwrap();

        assert_eq!(ledger.user("alice").unwrap().email, "a@x.com");
        assert!(matches!(
            ledger.user("bob").unwrap_err(),
            LedgerError::UserNotFound(_)
        ));
    }

    #[test]
    fn test_search_kinds() {
        let ledger = Ledger::new();
        let alice = ledger.register("alice", "a@x.com").unwrap();

        let by_name = ledger.search("alice");
        assert_eq!(by_name.kind(), Some(SearchKind::User));
        assert_eq!(by_name.users.len(), 1);

        let by_id = ledger.search(alice.id.as_str());
        assert_eq!(by_id.kind(), Some(SearchKind::User));
        assert_eq!(by_id.users[0].id, alice.id);

        let by_index = ledger.search("1");
        assert_eq!(by_index.kind(), Some(SearchKind::Block));
        assert_eq!(by_index.blocks[0].index, 1);

        let nothing = ledger.search("no-such-thing");
        assert!(nothing.is_empty());
        assert_eq!(nothing.kind(), None);
    }

    #[test]
    fn test_info_serializes_camel_case() {
        let ledger = Ledger::new();
        ledger.register("alice", "a@x.com").unwrap();

        let json = serde_json::to_value(ledger.info().unwrap()).unwrap();
        assert_eq!(json["totalBlocks"], 2);
        assert_eq!(json["totalUsers"], 1);
        assert_eq!(json["isValid"], true);
        assert_eq!(json["latestBlock"]["index"], 1);
    }

    #[test]
    fn test_search_mixed_and_dedup() {
        let ledger = Ledger::new();
        // A numeric username matches both a user and a block index.
        ledger.register("1", "one@x.com").unwrap();

        let results = ledger.search("1");
        assert_eq!(results.kind(), Some(SearchKind::Mixed));
        assert_eq!(results.users.len(), 1);
        assert_eq!(results.blocks.len(), 1);
    }
}
