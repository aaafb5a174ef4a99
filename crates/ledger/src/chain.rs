//! The ordered, append-only block chain.

use thiserror::Error;
use userchain_core::{now_millis, Block, Event};

/// Errors that can occur during chain operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("chain has no blocks")]
    EmptyChain,

    #[error("block {0} hash does not match its contents")]
    HashMismatch(u64),

    #[error("block {0} does not link to its predecessor")]
    BrokenLink(u64),
}

pub type Result<T> = std::result::Result<T, ChainError>;

/// The ordered, append-only sequence of blocks.
///
/// A chain starts with a fixed genesis block and grows monotonically; blocks
/// are never truncated or mutated in place. Appending takes `&mut self`, so
/// two writers can never build on the same observed tail.
#[derive(Debug)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Create a chain containing only the genesis block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::genesis()],
        }
    }

    /// Number of blocks in the chain.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the chain is empty. Always false for a well-formed chain.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The last block of the chain.
    ///
    /// A chain is never empty, so `EmptyChain` only surfaces if that
    /// invariant has been broken.
    pub fn latest(&self) -> Result<&Block> {
        self.blocks.last().ok_or(ChainError::EmptyChain)
    }

    /// Append a new block recording `payload` and return it.
    ///
    /// The block is stamped with the current time, the next index, and the
    /// current tail's hash as its parent link.
    pub fn append(&mut self, payload: Event) -> Result<&Block> {
        let (index, previous_hash) = {
            let latest = self.latest()?;
            (latest.index + 1, latest.hash)
        };

        self.blocks
            .push(Block::new(index, now_millis(), payload, previous_hash));
        self.latest()
    }

    /// Bounds-checked lookup by index.
    pub fn get(&self, index: u64) -> Option<&Block> {
        self.blocks.get(index as usize)
    }

    /// Read-only view of all blocks in order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Walk the chain and report the first integrity violation.
    ///
    /// Checks every non-genesis block's stored hash against its recomputed
    /// content hash, and its parent link against the predecessor's hash.
    /// Violations are reported, never repaired.
    pub fn check_integrity(&self) -> Result<()> {
        for i in 1..self.blocks.len() {
            let current = &self.blocks[i];
            let previous = &self.blocks[i - 1];

            if current.hash != current.content_hash() {
                tracing::warn!(index = current.index, "block hash does not match its contents");
                return Err(ChainError::HashMismatch(current.index));
            }

            if current.previous_hash != previous.hash {
                tracing::warn!(index = current.index, "block does not link to its predecessor");
                return Err(ChainError::BrokenLink(current.index));
            }
        }

        Ok(())
    }

    /// Whether every block's content hash and parent link check out.
    pub fn is_valid(&self) -> bool {
        self.check_integrity().is_ok()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
