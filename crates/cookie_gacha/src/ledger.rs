//! # Economy Ledger
//!
//! Two guarded balances: coins (primary, earned/spent in the shop) and
//! gems (premium, spent on draws).
//!
//! ## Invariant
//!
//! Neither balance is ever negative. A debit that would overdraw is rejected
//! before anything is written, so a failed call leaves the ledger exactly as
//! it was. Balances are `u64`, which makes a negative credit unrepresentable.
//!
//! Atomicity comes from `&mut self`: the check and the write happen inside
//! one exclusive borrow. The service wraps each session in its own lock to
//! extend that guarantee across threads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// The two currencies of the kingdom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Primary currency, spent in the shop.
    Coins,
    /// Premium currency, spent on draws.
    Gems,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coins => f.write_str("coins"),
            Self::Gems => f.write_str("gems"),
        }
    }
}

/// A read-only copy of both balances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    /// Primary currency balance.
    pub coins: u64,
    /// Premium currency balance.
    pub gems: u64,
}

impl Balances {
    /// Returns the balance of one currency.
    #[inline]
    #[must_use]
    pub const fn of(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Coins => self.coins,
            Currency::Gems => self.gems,
        }
    }
}

/// The ledger owning a session's balances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    balances: Balances,
}

impl Ledger {
    /// Creates a ledger with the given opening balances.
    #[must_use]
    pub const fn new(coins: u64, gems: u64) -> Self {
        Self {
            balances: Balances { coins, gems },
        }
    }

    /// Returns a copy of both balances.
    #[inline]
    #[must_use]
    pub const fn balances(&self) -> Balances {
        self.balances
    }

    /// Returns the balance of one currency.
    #[inline]
    #[must_use]
    pub const fn balance(&self, currency: Currency) -> u64 {
        self.balances.of(currency)
    }

    /// Returns true if a debit of `amount` would succeed.
    #[inline]
    #[must_use]
    pub const fn can_afford(&self, currency: Currency, amount: u64) -> bool {
        self.balance(currency) >= amount
    }

    /// Debits `amount` from `currency`.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` if the balance is below `amount`. The
    /// ledger is not modified in that case.
    ///
    /// # Returns
    ///
    /// The new balance of `currency`.
    pub fn debit(&mut self, currency: Currency, amount: u64) -> EconomyResult<u64> {
        let slot = self.slot_mut(currency);
        let available = *slot;

        let Some(remaining) = available.checked_sub(amount) else {
            return Err(EconomyError::InsufficientFunds {
                currency,
                required: amount,
                available,
            });
        };

        *slot = remaining;
        Ok(remaining)
    }

    /// Credits `amount` to `currency`. Never fails; saturates at `u64::MAX`.
    ///
    /// Returns the new balance of `currency`.
    pub fn credit(&mut self, currency: Currency, amount: u64) -> u64 {
        let slot = self.slot_mut(currency);
        *slot = slot.saturating_add(amount);
        *slot
    }

    /// Debits `price` of `pay` and credits `amount` of `receive` as one step.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientFunds` if `pay` cannot cover `price`; neither
    /// balance changes in that case.
    pub fn exchange(
        &mut self,
        pay: Currency,
        price: u64,
        receive: Currency,
        amount: u64,
    ) -> EconomyResult<Balances> {
        self.debit(pay, price)?;
        self.credit(receive, amount);
        Ok(self.balances)
    }

    fn slot_mut(&mut self, currency: Currency) -> &mut u64 {
        match currency {
            Currency::Coins => &mut self.balances.coins,
            Currency::Gems => &mut self.balances.gems,
        }
    }
}
