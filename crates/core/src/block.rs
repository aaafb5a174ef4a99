//! Hash-linked ledger blocks.

use crate::event::Event;
use crate::hash::{hash_concat, Hash};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current Unix timestamp in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// One immutable, hash-linked entry in the ledger.
///
/// The content hash is computed once at construction and binds the block to
/// its fields and its predecessor. There are no mutating methods; any
/// "modification" means constructing a new block. [`Block::content_hash`]
/// recomputes the digest from the current field values so a verifier can
/// detect tampering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Position in the chain (0 for genesis).
    pub index: u64,
    /// Unix timestamp in milliseconds at construction.
    pub timestamp: i64,
    /// The event this block records.
    #[serde(rename = "data")]
    pub payload: Event,
    /// Hash of the previous block, `Hash::ZERO` for genesis.
    pub previous_hash: Hash,
    /// Content hash over `(index, previous_hash, timestamp, payload)`.
    pub hash: Hash,
}

impl Block {
    /// Construct a block; the content hash is computed here.
    pub fn new(index: u64, timestamp: i64, payload: Event, previous_hash: Hash) -> Self {
        let hash = compute_hash(index, timestamp, &payload, &previous_hash);
        Self {
            index,
            timestamp,
            payload,
            previous_hash,
            hash,
        }
    }

    /// Create the genesis block.
    pub fn genesis() -> Self {
        Self::new(0, now_millis(), Event::Genesis, Hash::ZERO)
    }

    /// Recompute what this block's hash should be from its current fields.
    pub fn content_hash(&self) -> Hash {
        compute_hash(self.index, self.timestamp, &self.payload, &self.previous_hash)
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == Hash::ZERO
    }
}

fn compute_hash(index: u64, timestamp: i64, payload: &Event, previous_hash: &Hash) -> Hash {
    hash_concat(&[
        &index.to_be_bytes(),
        previous_hash.as_bytes(),
        &timestamp.to_be_bytes(),
        &payload.canonical_bytes(),
    ])
}
