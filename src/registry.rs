//! Identifier bookkeeping: the set of fileIDs in use, and minting fresh ones.

use std::collections::HashSet;

use crate::error::Error;
use crate::types::{Block, ID_MAX};

/// Fresh ids are probed upward from this base. Chosen to be numerically
/// distant from the small hand-assigned ids typical of scene files while
/// staying inside the positive 32-bit range.
pub const DEFAULT_MINT_BASE: i64 = 2_000_000_000;

/// The set of identifiers currently in use across the document.
/// Seeded once from every declared block id, it grows with each mint and
/// never shrinks during a run, so no two mints can collide with each
/// other or with a pre-existing id.
#[derive(Debug)]
pub struct IdRegistry {
    /// Probe base for minting.
    mint_base: i64,
    /// Every identifier declared in a header or minted so far.
    used: HashSet<i64>,
}

impl IdRegistry {
    /// Seed a registry from all parsed block ids. Overflow anchors carry
    /// no value and can never collide with minted ids (minting stays in
    /// the positive 32-bit range), so they are not tracked.
    pub fn collect(blocks: &[Block], mint_base: i64) -> Self {
        let used = blocks.iter().filter_map(|b| return b.id.as_value()).collect();
        return Self { mint_base, used };
    }

    /// Whether an id is declared in the document or was minted this run.
    pub fn contains(&self, id: i64) -> bool {
        return self.used.contains(&id);
    }

    /// Mint a fresh id: probe upward from the base until an unused value
    /// is found, recording it so no later mint returns the same value.
    ///
    /// # Errors
    ///
    /// Returns `Error::IdSpaceExhausted` if probing would pass the top of
    /// the accepted range.
    pub fn mint(&mut self) -> Result<i64, Error> {
        let mut candidate = self.mint_base;
        loop {
            if candidate > ID_MAX {
                return Err(Error::IdSpaceExhausted { ceiling: ID_MAX });
            }
            if !self.used.contains(&candidate) {
                self.used.insert(candidate);
                return Ok(candidate);
            }
            candidate = candidate.saturating_add(1);
        }
    }
}
