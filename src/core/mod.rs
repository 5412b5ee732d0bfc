//! Core business logic - framework-agnostic economy, logging, and
//! notification operations.
//!
//! Nothing in this module touches the chat SDK or the HTTP layer; everything
//! operates on the database connection and explicit injected state so tests
//! can construct isolated instances.

/// In-process cooldown tracking for coinflips and job applications
pub mod cooldown;
/// Wallet/bank balances, transfers, and the daily claim
pub mod economy;
/// Wagered random outcomes - coinflip and roulette
pub mod gamble;
/// Job catalog lookups and applications
pub mod jobs;
/// Per-event logging configuration and its process-local cache
pub mod logging;
/// Notification building and field-level diffs for platform events
pub mod notify;
