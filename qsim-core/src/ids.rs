//! Identity sequences and seed derivation

use crate::types::EntityId;

/// Issues entity ids 0, 1, 2, ... for the lifetime of one run.
#[derive(Debug, Default, Clone)]
pub struct EntityIdSequence {
    next: u64,
}

impl EntityIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next id.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is exhausted.
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity id sequence overflowed after {id}"));
        EntityId(id)
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministically derive an independent stream seed from a master seed.
///
/// Used so the arrival and service streams of one seeded run do not share
/// draws.
pub fn derive_seed(seed: u64, domain: u64) -> u64 {
    splitmix64(seed ^ splitmix64(domain))
}

pub const SEED_DOMAIN_ARRIVALS: u64 = 0x4152_5249_5641_4C53; // "ARRIVALS" (tag)
pub const SEED_DOMAIN_SERVICE: u64 = 0x5345_5256_4943_4553; // "SERVICES" (tag)
