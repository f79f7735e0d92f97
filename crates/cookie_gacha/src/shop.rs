//! # Shop Catalog
//!
//! Coin-priced items. Buying one debits coins and applies the item's effect
//! in the same step; see `Session::purchase`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// Unique identifier for a shop item.
pub type ShopItemId = u32;

/// What a purchase grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShopEffect {
    /// Credits premium currency.
    GrantGems {
        /// Gems credited.
        amount: u64,
    },
    /// Adds boost charges to the session.
    BoostCharges {
        /// Charges added.
        charges: u32,
    },
}

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    /// Unique item identifier.
    pub id: ShopItemId,
    /// Display name.
    pub name: String,
    /// Price in coins.
    pub price: u64,
    /// Effect applied on purchase.
    pub effect: ShopEffect,
}

impl ShopItem {
    /// Creates a shop item.
    #[must_use]
    pub fn new(id: ShopItemId, name: &str, price: u64, effect: ShopEffect) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            effect,
        }
    }
}

/// The validated, read-only shop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopCatalog {
    /// Items in display order.
    items: Vec<ShopItem>,
    /// Item id to position in `items`.
    index: HashMap<ShopItemId, usize>,
}

impl ShopCatalog {
    /// Builds a catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on a duplicate id, a zero price, or an effect
    /// that grants nothing.
    pub fn new(items: Vec<ShopItem>) -> EconomyResult<Self> {
        let mut index = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id, position).is_some() {
                return Err(EconomyError::InvalidConfig(format!(
                    "duplicate shop item id {}",
                    item.id
                )));
            }
            if item.price == 0 {
                return Err(EconomyError::InvalidConfig(format!(
                    "shop item {} ({}) has a zero price",
                    item.id, item.name
                )));
            }
            let grants_nothing = match item.effect {
                ShopEffect::GrantGems { amount } => amount == 0,
                ShopEffect::BoostCharges { charges } => charges == 0,
            };
            if grants_nothing {
                return Err(EconomyError::InvalidConfig(format!(
                    "shop item {} ({}) grants nothing",
                    item.id, item.name
                )));
            }
        }

        Ok(Self { items, index })
    }

    /// The reference shop.
    #[must_use]
    pub fn reference() -> Vec<ShopItem> {
        vec![
            ShopItem::new(1, "10 Gems", 100, ShopEffect::GrantGems { amount: 10 }),
            ShopItem::new(2, "50 Gems", 450, ShopEffect::GrantGems { amount: 50 }),
            ShopItem::new(3, "100 Gems", 800, ShopEffect::GrantGems { amount: 100 }),
            ShopItem::new(4, "Speed Boost x2", 200, ShopEffect::BoostCharges { charges: 1 }),
        ]
    }

    /// Looks up an item.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if `id` is not in the catalog.
    pub fn get(&self, id: ShopItemId) -> EconomyResult<&ShopItem> {
        self.index
            .get(&id)
            .and_then(|&position| self.items.get(position))
            .ok_or(EconomyError::UnknownItem(id))
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the shop sells nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ShopCatalog {
    fn default() -> Self {
        let items = Self::reference();
        let index = items.iter().enumerate().map(|(i, item)| (item.id, i)).collect();
        Self { items, index }
    }
}
