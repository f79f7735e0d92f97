//! # Cookie Gacha
//!
//! The reward loop of Cookie Kingdom: spend gems to draw characters, buy
//! gems with coins.
//!
//! ## Design Principles
//!
//! 1. **Balances never go negative** - every debit is checked before anything mutates
//! 2. **Integer multipliers** - rarity chances and stat multipliers are basis points
//! 3. **Commit before reveal** - a paid draw is collected before any delay starts
//! 4. **External configuration** - all balance data in TOML, validated once
//! 5. **Injected randomness** - seed a session and its draws are reproducible
//!
//! ## Thread Safety
//!
//! A [`Session`] is plain data mutated through `&mut self`. The
//! [`GachaService`] wraps many sessions in per-session locks so draws and
//! purchases can arrive from any thread or task.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cookie_gacha::{GachaService, GameConfig};
//!
//! let config = GameConfig::from_file("data/economy.toml")?;
//! let service = GachaService::from_config(config)?;
//!
//! let player = service.open_session();
//! service.request_purchase(player, 2)?;          // 450 coins -> 50 gems
//! let cookie = service.request_draw(player).await?;
//! println!("{cookie}");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod archetype;
pub mod character;
pub mod collection;
pub mod config;
pub mod error;
pub mod events;
pub mod generator;
pub mod ledger;
pub mod rarity;
pub mod service;
pub mod session;
pub mod shop;

pub use archetype::{Archetype, ArchetypeCatalog, ArchetypeId, Stats};
pub use character::{Character, CharacterId, CharacterIdAllocator};
pub use collection::{Collection, CollectionSummary};
pub use config::{EconomyRules, GameConfig};
pub use error::{EconomyError, EconomyResult};
pub use events::GachaEvent;
pub use generator::{DrawRoll, DrawStatistics, RewardGenerator};
pub use ledger::{Balances, Currency, Ledger};
pub use rarity::{Rarity, RarityChances, RarityTable};
pub use service::{GachaService, SessionId};
pub use session::{PendingReveal, PurchaseReceipt, Session, SessionSnapshot};
pub use shop::{ShopCatalog, ShopEffect, ShopItem, ShopItemId};
