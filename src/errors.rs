//! Unified error types for coinlog.
//!
//! User-facing validation failures (bad amounts, bad bets, cooldowns) are
//! distinct variants so the command layer can render them as chat replies
//! instead of logging them as internal failures.

use std::time::Duration;
use thiserror::Error;

/// All errors produced by the bot, the core engine, and the auth API.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Amount argument failed to parse or was not a positive integer.
    #[error("Invalid amount `{input}`: use a positive number or `all`")]
    InvalidAmount {
        /// The raw argument supplied by the user
        input: String,
    },

    /// Wager exceeds the available balance.
    #[error("Insufficient funds: tried to use {amount} but only {available} available")]
    InsufficientFunds {
        /// Amount the user tried to spend
        amount: i64,
        /// Balance actually available
        available: i64,
    },

    /// Roulette bet token outside the accepted set.
    #[error("Invalid bet `{input}`: bet must be red, black, even, odd or 0-36")]
    InvalidBet {
        /// The raw bet token supplied by the user
        input: String,
    },

    /// Job name not present in the catalog.
    #[error("Unknown job `{name}`")]
    UnknownJob {
        /// The job name the user asked for
        name: String,
    },

    /// Action attempted before its cooldown window elapsed.
    #[error("On cooldown for another {remaining:?}")]
    CooldownActive {
        /// Time left until the action is allowed again
        remaining: Duration,
    },

    /// Upstream user/server could not be resolved.
    #[error("Not found: {what}")]
    NotFound {
        /// What failed to resolve
        what: String,
    },

    /// Missing, invalid, or expired credentials.
    #[error("Authentication failed: {message}")]
    Auth {
        /// Why authentication failed
        message: String,
    },

    /// Document-store failure, surfaced to the caller as "try again".
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Session-token signing or verification failure.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// I/O error (config files, network binds).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or malformed.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error.
    #[error("Framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// True for errors caused by user input rather than system failure.
    /// The command layer replies to these instead of reporting a failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. }
                | Self::InsufficientFunds { .. }
                | Self::InvalidBet { .. }
                | Self::UnknownJob { .. }
                | Self::CooldownActive { .. }
        )
    }
}

/// Convenience `Result` type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
