//! Shared state for the auth API.

use crate::api::{codes::CodeStore, token::TokenSigner};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Everything the API handlers need, cloned per request by axum.
#[derive(Clone)]
pub struct ApiState {
    /// Platform HTTP client, shared with the bot
    pub http: Arc<serenity::Http>,
    /// Gateway cache, shared with the bot
    pub cache: Arc<serenity::Cache>,
    /// Pending one-time verification codes
    pub codes: Arc<CodeStore>,
    /// Session token signer/verifier
    pub signer: Arc<TokenSigner>,
    /// Whether session cookies carry the `Secure` attribute
    pub secure_cookies: bool,
}
