//! # Session
//!
//! One player's economy: ledger, collection, boost charges, RNG and event
//! queue, with `&mut self` as the single mutation entry point.
//!
//! ## Draw Protocol
//!
//! ```text
//! commit_draw()                              reveal()
//! ┌───────────────────────────────────┐      ┌────────────────────────┐
//! │ 1. debit gems      (fail -> stop) │ ──>  │ wait reveal_delay      │
//! │ 2. sample + instantiate character │      │ hand character to UI   │
//! │ 3. append to collection           │      │ (cancellable)          │
//! └───────────────────────────────────┘      └────────────────────────┘
//!        synchronous, never cancelled             presentation only
//! ```
//!
//! Once the debit succeeds, the append has already happened by the time
//! `commit_draw` returns. Dropping the [`PendingReveal`] only skips the
//! animation; the character stays in the collection.

use std::sync::Arc;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterIdAllocator};
use crate::collection::{Collection, CollectionSummary};
use crate::config::EconomyRules;
use crate::error::{EconomyError, EconomyResult};
use crate::events::GachaEvent;
use crate::generator::{DrawRoll, RewardGenerator};
use crate::ledger::{Balances, Currency, Ledger};
use crate::rarity::Rarity;
use crate::shop::{ShopEffect, ShopItemId};

/// A committed draw waiting for its reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "the character is already collected; drop only to skip the reveal"]
pub struct PendingReveal {
    character: Character,
    delay: Duration,
}

impl PendingReveal {
    /// The committed character, for callers that want to peek.
    pub const fn character(&self) -> &Character {
        &self.character
    }

    /// Presentation delay before the reveal.
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Skips the presentation delay.
    pub fn into_character(self) -> Character {
        self.character
    }

    /// Waits out the presentation delay, then hands over the character.
    pub async fn reveal(self) -> Character {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.character
    }
}

/// Outcome of a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Item bought.
    pub item_id: ShopItemId,
    /// Coins paid.
    pub price: u64,
    /// Effect applied.
    pub effect: ShopEffect,
    /// Balances after the purchase.
    pub balances: Balances,
    /// Boost charges after the purchase.
    pub boost_charges: u32,
}

/// Read-only copy of a session for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Both balances.
    pub balances: Balances,
    /// Unspent boost charges.
    pub boost_charges: u32,
    /// Every character drawn so far, oldest first.
    pub collection: Collection,
    /// Collection aggregates.
    pub summary: CollectionSummary,
}

/// A single player's gacha state.
pub struct Session {
    rules: Arc<EconomyRules>,
    ledger: Ledger,
    collection: Collection,
    boost_charges: u32,
    generator: RewardGenerator,
    rng: ChaCha20Rng,
    events: Vec<GachaEvent>,
}

impl Session {
    /// Creates a session with the rules' opening balances.
    #[must_use]
    pub fn new(rules: Arc<EconomyRules>, ids: CharacterIdAllocator, rng: ChaCha20Rng) -> Self {
        let generator = RewardGenerator::new(Arc::clone(&rules.archetypes), rules.rarity.clone(), ids);
        Self {
            ledger: Ledger::new(rules.starting_coins, rules.starting_gems),
            collection: Collection::new(),
            boost_charges: 0,
            generator,
            rng,
            events: Vec::with_capacity(16),
            rules,
        }
    }

    /// Creates a session with a deterministic RNG.
    #[must_use]
    pub fn seeded(rules: Arc<EconomyRules>, seed: u64) -> Self {
        Self::new(rules, CharacterIdAllocator::new(), ChaCha20Rng::seed_from_u64(seed))
    }

    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn from_entropy(rules: Arc<EconomyRules>) -> Self {
        Self::new(rules, CharacterIdAllocator::new(), ChaCha20Rng::from_entropy())
    }

    // ========================================================================
    // Draws
    // ========================================================================

    /// Debits the draw cost, draws one character and collects it.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` if the gem balance is below the draw
    /// cost. Nothing is sampled or collected in that case.
    pub fn commit_draw(&mut self) -> EconomyResult<PendingReveal> {
        self.charge_draw()?;
        let roll = DrawRoll::sample(&mut self.rng, self.generator.archetypes().len());
        Ok(self.settle_draw(roll))
    }

    /// Like [`Session::commit_draw`], sampling from a caller-supplied source.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` as `commit_draw` does; `rng` is untouched
    /// in that case.
    pub fn commit_draw_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EconomyResult<PendingReveal> {
        self.charge_draw()?;
        let roll = DrawRoll::sample(rng, self.generator.archetypes().len());
        Ok(self.settle_draw(roll))
    }

    /// Like [`Session::commit_draw`], with an exact roll.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` as `commit_draw` does.
    pub fn commit_draw_roll(&mut self, roll: DrawRoll) -> EconomyResult<PendingReveal> {
        self.charge_draw()?;
        Ok(self.settle_draw(roll))
    }

    /// Commits a draw and skips the reveal.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` if the gem balance is below the draw cost.
    pub fn perform_draw(&mut self) -> EconomyResult<Character> {
        self.commit_draw().map(PendingReveal::into_character)
    }

    /// Returns true if the gem balance covers one draw.
    #[must_use]
    pub fn can_draw(&self) -> bool {
        self.ledger.can_afford(Currency::Gems, self.rules.draw_cost)
    }

    fn charge_draw(&mut self) -> EconomyResult<()> {
        match self.ledger.debit(Currency::Gems, self.rules.draw_cost) {
            Ok(remaining) => {
                tracing::trace!(cost = self.rules.draw_cost, remaining, "draw charged");
                Ok(())
            }
            Err(reason) => {
                tracing::warn!(%reason, "draw rejected");
                self.events.push(GachaEvent::DrawRejected {
                    reason: reason.clone(),
                });
                Err(reason)
            }
        }
    }

    fn settle_draw(&mut self, roll: DrawRoll) -> PendingReveal {
        let character = self.generator.instantiate(roll);

        tracing::debug!(
            id = %character.id,
            name = %character.name,
            rarity = %character.rarity,
            power = character.power,
            "character drawn"
        );

        self.collection.push(character.clone());
        self.events.push(GachaEvent::CharacterDrawn {
            character_id: character.id,
            archetype_id: character.archetype_id,
            rarity: character.rarity,
            power: character.power,
        });
        if character.rarity >= Rarity::Epic {
            self.events.push(GachaEvent::RareDraw {
                character_id: character.id,
                rarity: character.rarity,
            });
        }

        PendingReveal {
            character,
            delay: self.rules.reveal_delay,
        }
    }

    // ========================================================================
    // Shop
    // ========================================================================

    /// Buys a shop item: debits its price in coins and applies its effect.
    ///
    /// # Errors
    ///
    /// - `UnknownItem` if `item_id` is not in the shop
    /// - `InsufficientFunds` if the coin balance is below the price
    ///
    /// Neither error changes any balance.
    pub fn purchase(&mut self, item_id: ShopItemId) -> EconomyResult<PurchaseReceipt> {
        let shop = Arc::clone(&self.rules.shop);
        let item = match shop.get(item_id) {
            Ok(item) => item,
            Err(reason) => return Err(self.reject_purchase(item_id, reason)),
        };

        let outcome = match item.effect {
            ShopEffect::GrantGems { amount } => {
                self.ledger
                    .exchange(Currency::Coins, item.price, Currency::Gems, amount)
            }
            ShopEffect::BoostCharges { charges } => {
                self.ledger.debit(Currency::Coins, item.price).map(|_| {
                    self.boost_charges = self.boost_charges.saturating_add(charges);
                    self.ledger.balances()
                })
            }
        };
        let balances = match outcome {
            Ok(balances) => balances,
            Err(reason) => return Err(self.reject_purchase(item_id, reason)),
        };

        tracing::info!(
            item_id,
            item = %item.name,
            price = item.price,
            coins = balances.coins,
            gems = balances.gems,
            "item purchased"
        );
        self.events.push(GachaEvent::ItemPurchased {
            item_id,
            name: item.name.clone(),
            effect: item.effect,
            balances,
        });

        Ok(PurchaseReceipt {
            item_id,
            price: item.price,
            effect: item.effect,
            balances,
            boost_charges: self.boost_charges,
        })
    }

    fn reject_purchase(&mut self, item_id: ShopItemId, reason: EconomyError) -> EconomyError {
        tracing::warn!(item_id, %reason, "purchase rejected");
        self.events.push(GachaEvent::PurchaseRejected {
            item_id,
            reason: reason.clone(),
        });
        reason
    }

    // ========================================================================
    // Read Access
    // ========================================================================

    /// Both balances.
    #[must_use]
    pub const fn balances(&self) -> Balances {
        self.ledger.balances()
    }

    /// The ledger.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The collection.
    #[must_use]
    pub const fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Unspent boost charges.
    #[must_use]
    pub const fn boost_charges(&self) -> u32 {
        self.boost_charges
    }

    /// The rules this session plays by.
    #[must_use]
    pub fn rules(&self) -> &EconomyRules {
        &self.rules
    }

    /// Copies the state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            balances: self.ledger.balances(),
            boost_charges: self.boost_charges,
            collection: self.collection.clone(),
            summary: self.collection.summary(),
        }
    }

    /// Takes every queued event. The queue is unbounded until drained.
    pub fn drain_events(&mut self) -> Vec<GachaEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("balances", &self.ledger.balances())
            .field("collection_len", &self.collection.len())
            .field("boost_charges", &self.boost_charges)
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}
