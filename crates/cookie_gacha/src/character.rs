//! # Drawn Characters
//!
//! A character is created once by the reward generator and never changes
//! afterwards. Identity comes from a shared monotonic allocator, so ids stay
//! unique across every session that shares it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::archetype::{ArchetypeId, Stats};
use crate::rarity::Rarity;

/// Unique identifier of a drawn character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out character ids. Clones share the same counter.
#[derive(Clone, Debug)]
pub struct CharacterIdAllocator {
    next: Arc<AtomicU64>,
}

impl CharacterIdAllocator {
    /// Creates an allocator whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Allocates the next id.
    #[inline]
    pub fn allocate(&self) -> CharacterId {
        // Uniqueness only; ids carry no ordering with other memory.
        CharacterId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}

impl Default for CharacterIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A drawn character instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Process-unique identity.
    pub id: CharacterId,
    /// Archetype this character was instantiated from.
    pub archetype_id: ArchetypeId,
    /// Display name, copied from the archetype.
    pub name: String,
    /// Visual key, copied from the archetype.
    pub visual: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Randomized, rarity-scaled strength score.
    pub power: u32,
    /// Archetype stats scaled by the rarity multiplier.
    pub stats: Stats,
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}] power {}",
            self.id, self.visual, self.name, self.rarity, self.power
        )
    }
}
