//! # Gacha Service
//!
//! Many sessions behind one thread-safe front door.
//!
//! ## Locking
//!
//! ```text
//! sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>
//!              │ read: look up handle, release
//!              ▼
//!           Mutex<Session>  <── one per session, held for the whole
//!                               debit -> generate -> append sequence
//! ```
//!
//! The registry lock is only held long enough to clone a handle. Each
//! session's mutex serializes its own draws and purchases, so two draws on
//! one session can never interleave a debit with the other's append, while
//! different sessions never wait on each other. The reveal delay runs after
//! the session lock is released.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterIdAllocator};
use crate::config::{EconomyRules, GameConfig};
use crate::error::{EconomyError, EconomyResult};
use crate::events::GachaEvent;
use crate::ledger::Balances;
use crate::session::{PendingReveal, Session, SessionSnapshot};
use crate::shop::ShopItemId;

/// Identifier of an open session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

type SessionHandle = Arc<Mutex<Session>>;

/// Thread-safe registry of sessions sharing one set of rules.
///
/// `GachaService` is `Send + Sync`; share it behind an `Arc`.
pub struct GachaService {
    rules: Arc<EconomyRules>,
    /// Shared by every session so character ids are process-unique.
    ids: CharacterIdAllocator,
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    next_session: AtomicU64,
}

impl GachaService {
    /// Creates a service over validated rules.
    #[must_use]
    pub fn new(rules: EconomyRules) -> Self {
        Self {
            rules: Arc::new(rules),
            ids: CharacterIdAllocator::new(),
            sessions: RwLock::new(HashMap::new()),
            next_session: AtomicU64::new(1),
        }
    }

    /// Validates a config and creates a service from it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the config does not validate.
    pub fn from_config(config: GameConfig) -> EconomyResult<Self> {
        Ok(Self::new(config.validate()?))
    }

    /// The shared rules.
    #[must_use]
    pub fn rules(&self) -> &EconomyRules {
        &self.rules
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Opens a session seeded from OS entropy.
    pub fn open_session(&self) -> SessionId {
        self.insert(ChaCha20Rng::from_entropy())
    }

    /// Opens a session with a deterministic RNG.
    pub fn open_seeded_session(&self, seed: u64) -> SessionId {
        self.insert(ChaCha20Rng::seed_from_u64(seed))
    }

    fn insert(&self, rng: ChaCha20Rng) -> SessionId {
        let id = SessionId(self.next_session.fetch_add(1, Ordering::Relaxed));
        let session = Session::new(Arc::clone(&self.rules), self.ids.clone(), rng);
        self.sessions.write().insert(id, Arc::new(Mutex::new(session)));
        tracing::info!(session = %id, "session opened");
        id
    }

    /// Closes a session and returns its final state.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSession` if `id` is not open.
    pub fn close_session(&self, id: SessionId) -> EconomyResult<SessionSnapshot> {
        let handle = self
            .sessions
            .write()
            .remove(&id)
            .ok_or(EconomyError::UnknownSession(id))?;
        let snapshot = handle.lock().snapshot();
        tracing::info!(
            session = %id,
            collected = snapshot.collection.len(),
            "session closed"
        );
        Ok(snapshot)
    }

    /// Number of open sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    fn session(&self, id: SessionId) -> EconomyResult<SessionHandle> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or(EconomyError::UnknownSession(id))
    }

    // ========================================================================
    // Player Requests
    // ========================================================================

    /// Commits a draw without waiting for the reveal.
    ///
    /// # Errors
    ///
    /// `UnknownSession`, or `InsufficientFunds` if the session cannot pay.
    pub fn commit_draw(&self, id: SessionId) -> EconomyResult<PendingReveal> {
        let session = self.session(id)?;
        let pending = session.lock().commit_draw();
        pending
    }

    /// Draws a character and resolves after the reveal delay.
    ///
    /// The draw is committed before the first await. Cancelling the returned
    /// future only cancels the reveal; the character is already collected.
    ///
    /// # Errors
    ///
    /// `UnknownSession`, or `InsufficientFunds` if the session cannot pay.
    pub async fn request_draw(&self, id: SessionId) -> EconomyResult<Character> {
        let pending = self.commit_draw(id)?;
        Ok(pending.reveal().await)
    }

    /// Buys a shop item and returns the new balances.
    ///
    /// # Errors
    ///
    /// `UnknownSession`, `UnknownItem`, or `InsufficientFunds`.
    pub fn request_purchase(&self, id: SessionId, item_id: ShopItemId) -> EconomyResult<Balances> {
        let session = self.session(id)?;
        let receipt = session.lock().purchase(item_id)?;
        Ok(receipt.balances)
    }

    /// Read-only snapshot of a session.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSession` if `id` is not open.
    pub fn state(&self, id: SessionId) -> EconomyResult<SessionSnapshot> {
        let session = self.session(id)?;
        let snapshot = session.lock().snapshot();
        Ok(snapshot)
    }

    /// Drains a session's queued events.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSession` if `id` is not open.
    pub fn drain_events(&self, id: SessionId) -> EconomyResult<Vec<GachaEvent>> {
        let session = self.session(id)?;
        let events = session.lock().drain_events();
        Ok(events)
    }
}

impl Default for GachaService {
    fn default() -> Self {
        Self::new(EconomyRules::default())
    }
}
