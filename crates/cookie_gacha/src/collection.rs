//! # Collection
//!
//! Append-only, ordered store of drawn characters. The only way in is a
//! paid draw (crate-internal `push`); nothing ever leaves.

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::rarity::Rarity;

/// A session's drawn characters, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    characters: Vec<Character>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            characters: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, character: Character) {
        self.characters.push(character);
    }

    /// Number of characters collected.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if nothing has been drawn yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// All characters in draw order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Character] {
        &self.characters
    }

    /// Iterates characters in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// The most recent draw.
    #[must_use]
    pub fn last(&self) -> Option<&Character> {
        self.characters.last()
    }

    /// Looks a character up by id.
    #[must_use]
    pub fn find(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Counts, legendary tally and total power.
    #[must_use]
    pub fn summary(&self) -> CollectionSummary {
        let mut summary = CollectionSummary::default();
        for character in &self.characters {
            summary.total += 1;
            summary.by_rarity[character.rarity.index()] += 1;
            summary.total_power += u64::from(character.power);
        }
        summary.legendary = summary.by_rarity[Rarity::Legendary.index()];
        summary
    }
}

/// Aggregate view of a collection for the home screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Number of characters.
    pub total: u64,
    /// Number of legendary characters.
    pub legendary: u64,
    /// Sum of every character's power.
    pub total_power: u64,
    /// Counts indexed by [`Rarity::index`].
    pub by_rarity: [u64; 4],
}
