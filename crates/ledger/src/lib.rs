//! Tamper-evident user-registration ledger for userchain.
//!
//! This crate brings the core primitives together into the mutable half of
//! the system:
//! - **Chain**: the ordered, append-only sequence of hash-linked blocks
//! - **UserRegistry**: uniqueness-enforcing user store paired 1:1 with the
//!   chain's registration blocks
//! - **Ledger**: the shared facade handed to transport layers
//!
//! # Example
//!
//! ```rust
//! use userchain_ledger::Ledger;
//!
//! let ledger = Ledger::new();
//! let user = ledger.register("alice", "alice@example.com").unwrap();
//!
//! let info = ledger.info().unwrap();
//! assert_eq!(info.total_blocks, 2); // genesis + registration
//! assert_eq!(info.total_users, 1);
//! assert!(info.is_valid);
//!
//! let block = ledger.block(1).unwrap();
//! assert_eq!(block.previous_hash, ledger.block(0).unwrap().hash);
//! # let _ = user;
//! ```

pub mod chain;
pub mod ledger;
pub mod registry;

// Re-export commonly used types
pub use chain::{Chain, ChainError};
pub use ledger::{Ledger, LedgerError, LedgerInfo, SearchKind, SearchResults};
pub use registry::{RegistryError, UserRegistry};
