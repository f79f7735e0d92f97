//! # Economy Error Types
//!
//! All errors that can occur in the gacha economy.
//!
//! `InsufficientFunds` and `UnknownItem` are the expected, recoverable
//! outcomes of player requests. Everything else is raised while loading
//! configuration or addressing the service, never mid-draw.

use thiserror::Error;

use crate::ledger::Currency;
use crate::service::SessionId;
use crate::shop::ShopItemId;

/// Errors that can occur in the gacha economy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// A debit would have taken a balance below zero.
    #[error("insufficient {currency}: need {required}, have {available}")]
    InsufficientFunds {
        /// The currency that was short.
        currency: Currency,
        /// The amount the operation needed.
        required: u64,
        /// The balance at the time of the check.
        available: u64,
    },

    /// Purchase referenced an id that is not in the shop catalog.
    #[error("unknown shop item: {0}")]
    UnknownItem(ShopItemId),

    /// Service call referenced a session that is not open.
    #[error("unknown session: {0}")]
    UnknownSession(SessionId),

    /// Invalid configuration (rejected at startup).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Configuration file could not be read.
    #[error("config io error: {0}")]
    Io(String),
}

impl From<toml::de::Error> for EconomyError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

impl From<std::io::Error> for EconomyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
