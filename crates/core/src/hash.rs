//! Stable outcome hashing for deterministic verification.
//! This module exists so fuzz runs and tests can compare whole batches of
//! searches with a single value. It does not own search control.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::planner::SearchOutcome;
use crate::types::Pos;

// Integers are fed as little-endian bytes so fingerprints match across hosts.
fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write(&pos.x.to_le_bytes());
    hasher.write(&pos.y.to_le_bytes());
}

impl SearchOutcome {
    /// Feeds this outcome into a running hash. Fingerprints are stable across
    /// runs and platforms for the same outcome.
    pub fn hash_into(&self, hasher: &mut Xxh3) {
        match self {
            SearchOutcome::Found(result) => {
                hasher.write_u8(0);
                hasher.write(&result.cost.to_le_bytes());
                hasher.write(&result.nodes_expanded.to_le_bytes());
                hasher.write(&(result.path.len() as u64).to_le_bytes());
                for &pos in &result.path {
                    write_pos(hasher, pos);
                }
            }
            SearchOutcome::NoPath { nodes_expanded } => {
                hasher.write_u8(1);
                hasher.write(&nodes_expanded.to_le_bytes());
            }
            SearchOutcome::BudgetExhausted { nodes_expanded } => {
                hasher.write_u8(2);
                hasher.write(&nodes_expanded.to_le_bytes());
            }
        }
    }

    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        self.hash_into(&mut hasher);
        hasher.finish()
    }
}
