//! # Economy Events
//!
//! Every session queues what happened to it so the presentation layer can
//! show toasts and reveal animations. The queue is drained, not observed:
//! each event is delivered once, and it keeps growing until the host calls
//! `drain_events`. Draw events carry ids, not characters; the collection
//! holds the only copy.

use crate::archetype::ArchetypeId;
use crate::character::CharacterId;
use crate::error::EconomyError;
use crate::ledger::Balances;
use crate::rarity::Rarity;
use crate::shop::{ShopEffect, ShopItemId};

/// Something the presentation layer may want to announce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GachaEvent {
    /// A paid draw produced a character.
    CharacterDrawn {
        /// The new character, now in the collection.
        character_id: CharacterId,
        /// Template it was drawn from.
        archetype_id: ArchetypeId,
        /// Its tier.
        rarity: Rarity,
        /// Its power.
        power: u32,
    },
    /// Epic or legendary draw (special reveal effect).
    RareDraw {
        /// The character.
        character_id: CharacterId,
        /// Its tier.
        rarity: Rarity,
    },
    /// A draw was refused before anything was charged.
    DrawRejected {
        /// Why.
        reason: EconomyError,
    },
    /// A shop purchase went through.
    ItemPurchased {
        /// Item bought.
        item_id: ShopItemId,
        /// Item display name.
        name: String,
        /// Effect applied.
        effect: ShopEffect,
        /// Balances after the purchase.
        balances: Balances,
    },
    /// A purchase was refused before anything was charged.
    PurchaseRejected {
        /// Item requested.
        item_id: ShopItemId,
        /// Why.
        reason: EconomyError,
    },
}

impl GachaEvent {
    /// Returns true for rejections.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::DrawRejected { .. } | Self::PurchaseRejected { .. })
    }
}
