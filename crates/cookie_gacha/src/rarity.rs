//! # Rarity Tiers
//!
//! Four tiers with a draw chance and a stat multiplier each.
//!
//! | Tier      | Chance | Multiplier |
//! |-----------|--------|------------|
//! | Common    | 50%    | x1.0       |
//! | Rare      | 30%    | x1.2       |
//! | Epic      | 15%    | x1.5       |
//! | Legendary | 5%     | x2.0       |
//!
//! Chances and multipliers are stored in basis points (10000 = 100% / x1)
//! so that `floor(base * multiplier)` is exact integer math.
//!
//! ## One Table, Two Views
//!
//! [`RarityTable`] is the single source of truth for chances. The display
//! percentages and the cumulative thresholds used for sampling are both
//! derived from it, so the two can never drift apart.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// Basis points in 100% (and in a x1 multiplier).
pub const BASIS_POINTS: u32 = 10_000;

/// Rarity tier of a drawn character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rarity {
    /// Common (gray) - 50% of draws.
    Common = 0,
    /// Rare (blue) - 30% of draws.
    Rare = 1,
    /// Epic (purple) - 15% of draws.
    Epic = 2,
    /// Legendary (gold) - 5% of draws.
    Legendary = 3,
}

impl Rarity {
    /// All tiers, most common first.
    pub const ALL: [Self; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    /// Stat multiplier in basis points.
    #[inline]
    #[must_use]
    pub const fn multiplier_bp(self) -> u32 {
        match self {
            Self::Common => 10_000,    // x1
            Self::Rare => 12_000,      // x1.2
            Self::Epic => 15_000,      // x1.5
            Self::Legendary => 20_000, // x2
        }
    }

    /// Reference draw chance in basis points.
    #[inline]
    #[must_use]
    pub const fn default_chance_bp(self) -> u32 {
        match self {
            Self::Common => 5000,
            Self::Rare => 3000,
            Self::Epic => 1500,
            Self::Legendary => 500,
        }
    }

    /// Applies the multiplier to `base`, flooring the result.
    #[inline]
    #[must_use]
    pub const fn scale(self, base: u32) -> u32 {
        // u64 intermediate: u32::MAX * 20_000 does not fit in u32.
        ((base as u64 * self.multiplier_bp() as u64) / BASIS_POINTS as u64) as u32
    }

    /// Like [`Rarity::scale`], returning `None` if the result exceeds `u32`.
    #[inline]
    #[must_use]
    pub fn checked_scale(self, base: u32) -> Option<u32> {
        let scaled = u64::from(base) * u64::from(self.multiplier_bp()) / u64::from(BASIS_POINTS);
        u32::try_from(scaled).ok()
    }

    /// Index into per-tier arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw chances per tier, as written in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityChances {
    /// Common chance in basis points.
    pub common: u32,
    /// Rare chance in basis points.
    pub rare: u32,
    /// Epic chance in basis points.
    pub epic: u32,
    /// Legendary chance in basis points.
    pub legendary: u32,
}

impl RarityChances {
    /// Returns the chance of one tier.
    #[must_use]
    pub const fn of(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }
}

impl Default for RarityChances {
    fn default() -> Self {
        Self {
            common: Rarity::Common.default_chance_bp(),
            rare: Rarity::Rare.default_chance_bp(),
            epic: Rarity::Epic.default_chance_bp(),
            legendary: Rarity::Legendary.default_chance_bp(),
        }
    }
}

/// Validated rarity table with pre-computed cumulative thresholds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RarityTable {
    chances: RarityChances,
    /// `(tier, exclusive upper bound)`, rarest first.
    thresholds: [(Rarity, u32); 4],
}

impl RarityTable {
    /// Builds a table from per-tier chances.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any tier has a zero chance or the chances
    /// do not sum to exactly 10000 basis points.
    pub fn new(chances: RarityChances) -> EconomyResult<Self> {
        let mut total = 0u32;
        for rarity in Rarity::ALL {
            let chance = chances.of(rarity);
            if chance == 0 {
                return Err(EconomyError::InvalidConfig(format!(
                    "rarity {rarity} has a zero draw chance"
                )));
            }
            total = total.saturating_add(chance);
        }
        if total != BASIS_POINTS {
            return Err(EconomyError::InvalidConfig(format!(
                "rarity chances sum to {total} bp, expected {BASIS_POINTS}"
            )));
        }

        Ok(Self::with_thresholds(chances))
    }

    fn with_thresholds(chances: RarityChances) -> Self {
        // Rarest tier claims the lowest band of the roll.
        let mut thresholds = [(Rarity::Common, 0u32); 4];
        let mut cumulative = 0u32;
        for (slot, rarity) in thresholds.iter_mut().zip(Rarity::ALL.iter().rev()) {
            cumulative += chances.of(*rarity);
            *slot = (*rarity, cumulative);
        }

        Self { chances, thresholds }
    }

    /// Selects the tier for a roll in `[0, 10000)`.
    ///
    /// The first band whose upper bound exceeds the roll wins; anything past
    /// the last band falls through to common.
    #[inline]
    #[must_use]
    pub fn tier_for_roll(&self, roll_bp: u32) -> Rarity {
        self.thresholds
            .iter()
            .find(|(_, upper)| roll_bp < *upper)
            .map_or(Rarity::Common, |(rarity, _)| *rarity)
    }

    /// Draw chance of a tier in basis points.
    #[inline]
    #[must_use]
    pub const fn chance_bp(&self, rarity: Rarity) -> u32 {
        self.chances.of(rarity)
    }

    /// Draw chance of a tier as a display percentage.
    #[must_use]
    pub fn chance_percent(&self, rarity: Rarity) -> f64 {
        f64::from(self.chance_bp(rarity)) / 100.0
    }

    /// The chances this table was built from.
    #[must_use]
    pub const fn chances(&self) -> RarityChances {
        self.chances
    }

    /// Cumulative `(tier, upper bound)` bands, rarest first.
    #[must_use]
    pub const fn thresholds(&self) -> &[(Rarity, u32); 4] {
        &self.thresholds
    }
}

impl Default for RarityTable {
    fn default() -> Self {
        Self::with_thresholds(RarityChances::default())
    }
}
