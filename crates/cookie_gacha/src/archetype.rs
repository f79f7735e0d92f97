//! # Archetype Catalog
//!
//! Static character templates. A drawn character takes its name, visual key
//! and base stats from one archetype; rarity only scales the stats.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};
use crate::rarity::Rarity;

/// Unique identifier for an archetype.
pub type ArchetypeId = u32;

/// Combat stats of an archetype or a drawn character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    /// Attack.
    pub attack: u32,
    /// Defense.
    pub defense: u32,
    /// Speed.
    pub speed: u32,
}

impl Stats {
    /// Creates a stat block.
    #[inline]
    #[must_use]
    pub const fn new(attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            attack,
            defense,
            speed,
        }
    }

    /// Scales every stat by the rarity multiplier, flooring each.
    #[inline]
    #[must_use]
    pub const fn scaled(self, rarity: Rarity) -> Self {
        Self {
            attack: rarity.scale(self.attack),
            defense: rarity.scale(self.defense),
            speed: rarity.scale(self.speed),
        }
    }

    /// Scales every stat, returning `None` if any result exceeds `u32`.
    #[must_use]
    pub fn checked_scaled(self, rarity: Rarity) -> Option<Self> {
        Some(Self {
            attack: rarity.checked_scale(self.attack)?,
            defense: rarity.checked_scale(self.defense)?,
            speed: rarity.checked_scale(self.speed)?,
        })
    }

    /// Returns true if every stat is positive.
    #[inline]
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.attack > 0 && self.defense > 0 && self.speed > 0
    }
}

/// A character template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    /// Unique archetype identifier.
    pub id: ArchetypeId,
    /// Display name.
    pub name: String,
    /// Emoji or asset key used by the presentation layer.
    pub visual: String,
    /// Stats before the rarity multiplier.
    pub base_stats: Stats,
}

impl Archetype {
    /// Creates an archetype.
    #[must_use]
    pub fn new(id: ArchetypeId, name: &str, visual: &str, base_stats: Stats) -> Self {
        Self {
            id,
            name: name.to_string(),
            visual: visual.to_string(),
            base_stats,
        }
    }
}

/// The validated, read-only set of archetypes a draw picks from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchetypeCatalog {
    archetypes: Vec<Archetype>,
}

impl ArchetypeCatalog {
    /// Builds a catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the catalog is empty, an id repeats, or an
    /// archetype has a zero base stat or one that overflows when scaled by
    /// the largest rarity multiplier.
    pub fn new(archetypes: Vec<Archetype>) -> EconomyResult<Self> {
        if archetypes.is_empty() {
            return Err(EconomyError::InvalidConfig(
                "archetype catalog must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(archetypes.len());
        for archetype in &archetypes {
            if !seen.insert(archetype.id) {
                return Err(EconomyError::InvalidConfig(format!(
                    "duplicate archetype id {}",
                    archetype.id
                )));
            }
            if !archetype.base_stats.is_positive() {
                return Err(EconomyError::InvalidConfig(format!(
                    "archetype {} ({}) has a zero base stat",
                    archetype.id, archetype.name
                )));
            }
            if Rarity::ALL
                .iter()
                .any(|rarity| archetype.base_stats.checked_scaled(*rarity).is_none())
            {
                return Err(EconomyError::InvalidConfig(format!(
                    "archetype {} ({}) base stats overflow when scaled",
                    archetype.id, archetype.name
                )));
            }
        }

        Ok(Self { archetypes })
    }

    /// The reference catalog: six cookies.
    #[must_use]
    pub fn reference() -> Vec<Archetype> {
        vec![
            Archetype::new(1, "Chocolate Cookie", "🍪", Stats::new(15, 10, 12)),
            Archetype::new(2, "Strawberry Cookie", "🍓", Stats::new(12, 15, 10)),
            Archetype::new(3, "Vanilla Cookie", "🧁", Stats::new(10, 12, 15)),
            Archetype::new(4, "Caramel Cookie", "🍯", Stats::new(18, 8, 14)),
            Archetype::new(5, "Mint Cookie", "🌿", Stats::new(14, 14, 12)),
            Archetype::new(6, "Rainbow Cookie", "🌈", Stats::new(20, 20, 20)),
        ]
    }

    /// Number of archetypes. Never zero.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Returns true if the catalog has no archetypes. False for any built catalog.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Archetype at a sampling index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Archetype> {
        self.archetypes.get(index)
    }

    /// Archetype for a sampling index, wrapping around the catalog.
    #[inline]
    #[must_use]
    pub fn pick(&self, index: usize) -> &Archetype {
        // Non-empty by construction.
        &self.archetypes[index % self.archetypes.len()]
    }

    /// Looks an archetype up by id.
    #[must_use]
    pub fn find(&self, id: ArchetypeId) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }

    /// Iterates archetypes in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.iter()
    }
}

impl Default for ArchetypeCatalog {
    fn default() -> Self {
        Self {
            archetypes: Self::reference(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_catalog_is_valid() {
        let catalog = ArchetypeCatalog::new(ArchetypeCatalog::reference()).unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog, ArchetypeCatalog::default());
        assert_eq!(catalog.find(6).map(|a| a.base_stats), Some(Stats::new(20, 20, 20)));
    }

    #[test]
    fn test_epic_scaling_example() {
        let base = Stats::new(15, 10, 12);
        assert_eq!(base.scaled(Rarity::Epic), Stats::new(22, 15, 18));
        assert_eq!(base.scaled(Rarity::Common), base);
    }

    #[test]
    fn test_rejects_invalid_catalogs() {
        assert!(ArchetypeCatalog::new(Vec::new()).is_err());

        let mut duplicated = ArchetypeCatalog::reference();
        duplicated[1].id = duplicated[0].id;
        assert!(ArchetypeCatalog::new(duplicated).is_err());

        let mut zero = ArchetypeCatalog::reference();
        zero[2].base_stats.speed = 0;
        let err = ArchetypeCatalog::new(zero).unwrap_err();
        assert!(err.to_string().contains("Vanilla Cookie"));
    }

    #[test]
    fn test_rejects_stats_that_overflow_when_scaled() {
        // 3e9 fits in u32, 6e9 at legendary does not.
        let mut huge = ArchetypeCatalog::reference();
        huge[0].base_stats.attack = 3_000_000_000;
        let err = ArchetypeCatalog::new(huge).unwrap_err();
        assert!(matches!(err, EconomyError::InvalidConfig(_)));
        assert!(err.to_string().contains("overflow"));

        // Largest base that still fits at x2.
        let mut edge = ArchetypeCatalog::reference();
        edge[0].base_stats.attack = u32::MAX / 2;
        let catalog = ArchetypeCatalog::new(edge).unwrap();
        assert_eq!(
            catalog.pick(0).base_stats.scaled(Rarity::Legendary).attack,
            u32::MAX - 1
        );
    }
}
