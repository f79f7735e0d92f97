//! # Game Configuration
//!
//! All balance data lives in TOML and is loaded once at startup:
//!
//! ```toml
//! starting_coins = 1000
//! starting_gems = 50
//! draw_cost = 10
//! reveal_delay_ms = 1500
//!
//! [rarity]
//! common = 5000
//! rare = 3000
//! epic = 1500
//! legendary = 500
//!
//! [[archetypes]]
//! id = 1
//! name = "Chocolate Cookie"
//! visual = "🍪"
//! base_stats = { attack = 15, defense = 10, speed = 12 }
//!
//! [[shop]]
//! id = 1
//! name = "10 Gems"
//! price = 100
//! effect = { kind = "grant_gems", amount = 10 }
//! ```
//!
//! Every key is optional; missing keys take the reference values.
//! [`GameConfig::validate`] turns the raw file into immutable
//! [`EconomyRules`] or fails. There is no way to start a session from an
//! unvalidated config.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::archetype::{Archetype, ArchetypeCatalog};
use crate::error::{EconomyError, EconomyResult};
use crate::rarity::{RarityChances, RarityTable};
use crate::shop::{ShopCatalog, ShopItem};

/// Raw configuration as written on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Coins a new session starts with.
    pub starting_coins: u64,
    /// Gems a new session starts with.
    pub starting_gems: u64,
    /// Gems debited per draw.
    pub draw_cost: u64,
    /// Presentation delay between commit and reveal, in milliseconds.
    pub reveal_delay_ms: u64,
    /// Draw chance per rarity tier, in basis points.
    pub rarity: RarityChances,
    /// Character templates.
    pub archetypes: Vec<Archetype>,
    /// Shop items.
    pub shop: Vec<ShopItem>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_coins: 1000,
            starting_gems: 50,
            draw_cost: 10,
            reveal_delay_ms: 1500,
            rarity: RarityChances::default(),
            archetypes: ArchetypeCatalog::reference(),
            shop: ShopCatalog::reference(),
        }
    }
}

impl GameConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` on malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> EconomyResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `ConfigParse` if it is not
    /// valid config TOML.
    pub fn from_file(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "loaded economy config");
        Ok(config)
    }

    /// Validates the config and freezes it into rules.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the draw cost is zero or any catalog is
    /// invalid (see [`RarityTable::new`], [`ArchetypeCatalog::new`],
    /// [`ShopCatalog::new`]).
    pub fn validate(self) -> EconomyResult<EconomyRules> {
        if self.draw_cost == 0 {
            return Err(EconomyError::InvalidConfig(
                "draw cost must be positive".to_string(),
            ));
        }

        let rarity = RarityTable::new(self.rarity)?;
        let archetypes = ArchetypeCatalog::new(self.archetypes)?;
        let shop = ShopCatalog::new(self.shop)?;

        Ok(EconomyRules {
            starting_coins: self.starting_coins,
            starting_gems: self.starting_gems,
            draw_cost: self.draw_cost,
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            rarity,
            archetypes: Arc::new(archetypes),
            shop: Arc::new(shop),
        })
    }
}

/// Validated, immutable rules shared by every session.
#[derive(Clone, Debug)]
pub struct EconomyRules {
    /// Coins a new session starts with.
    pub starting_coins: u64,
    /// Gems a new session starts with.
    pub starting_gems: u64,
    /// Gems debited per draw.
    pub draw_cost: u64,
    /// Presentation delay between commit and reveal.
    pub reveal_delay: Duration,
    /// Rarity table.
    pub rarity: RarityTable,
    /// Archetype catalog.
    pub archetypes: Arc<ArchetypeCatalog>,
    /// Shop catalog.
    pub shop: Arc<ShopCatalog>,
}

impl Default for EconomyRules {
    fn default() -> Self {
        let config = GameConfig::default();
        Self {
            starting_coins: config.starting_coins,
            starting_gems: config.starting_gems,
            draw_cost: config.draw_cost,
            reveal_delay: Duration::from_millis(config.reveal_delay_ms),
            rarity: RarityTable::default(),
            archetypes: Arc::new(ArchetypeCatalog::default()),
            shop: Arc::new(ShopCatalog::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::Stats;
    use crate::shop::ShopEffect;

    const SHIPPED: &str = include_str!("../data/economy.toml");

    #[test]
    fn test_shipped_config_matches_reference() {
        let config = GameConfig::from_toml_str(SHIPPED).unwrap();
        assert_eq!(config, GameConfig::default());

        let rules = config.validate().unwrap();
        assert_eq!(rules.archetypes.len(), 6);
        assert_eq!(rules.shop.len(), 4);
        assert_eq!(rules.reveal_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let config = GameConfig::from_toml_str("starting_gems = 10\ndraw_cost = 5\n").unwrap();
        assert_eq!(config.starting_gems, 10);
        assert_eq!(config.draw_cost, 5);
        assert_eq!(config.starting_coins, 1000);
        assert_eq!(config.archetypes, ArchetypeCatalog::reference());
    }

    #[test]
    fn test_custom_catalogs() {
        let text = r#"
            [[archetypes]]
            id = 9
            name = "Burnt Cookie"
            visual = "🔥"
            base_stats = { attack = 3, defense = 1, speed = 2 }

            [[shop]]
            id = 7
            name = "Boost Pack"
            price = 50
            effect = { kind = "boost_charges", charges = 3 }
        "#;
        let rules = GameConfig::from_toml_str(text).unwrap().validate().unwrap();

        assert_eq!(rules.archetypes.len(), 1);
        assert_eq!(rules.archetypes.pick(0).base_stats, Stats::new(3, 1, 2));
        assert_eq!(
            rules.shop.get(7).map(|item| item.effect),
            Ok(ShopEffect::BoostCharges { charges: 3 })
        );
    }

    #[test]
    fn test_validation_fails_loudly() {
        let zero_cost = GameConfig { draw_cost: 0, ..GameConfig::default() };
        assert!(matches!(zero_cost.validate(), Err(EconomyError::InvalidConfig(_))));

        let no_archetypes = GameConfig { archetypes: Vec::new(), ..GameConfig::default() };
        assert!(matches!(no_archetypes.validate(), Err(EconomyError::InvalidConfig(_))));

        let lopsided = GameConfig::from_toml_str("[rarity]\ncommon = 9000\n").unwrap();
        assert!(matches!(lopsided.validate(), Err(EconomyError::InvalidConfig(_))));

        let oversized = GameConfig::from_toml_str(
            r#"
            [[archetypes]]
            id = 1
            name = "Giant Cookie"
            visual = "🍪"
            base_stats = { attack = 3000000000, defense = 1, speed = 1 }
            "#,
        )
        .unwrap();
        assert!(matches!(oversized.validate(), Err(EconomyError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            GameConfig::from_toml_str("draw_cost = \"ten\""),
            Err(EconomyError::ConfigParse(_))
        ));
        assert!(matches!(
            GameConfig::from_file("/nonexistent/economy.toml"),
            Err(EconomyError::Io(_))
        ));
    }
}
